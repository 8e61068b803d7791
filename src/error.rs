use std::{io, path::PathBuf};

use thiserror::Error;

/// File-level failures. Field-level problems never reach this type, they are
/// coerced to zero values while decoding.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open input {}: {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot write output {}: {source}", path.display())]
    WriteOutput { path: PathBuf, source: io::Error },
}
