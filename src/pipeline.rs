use log::{debug, info};
use std::{fs, path::Path, path::PathBuf};

use crate::{
    config::ImportConfig,
    error::ImportError,
    product::Product,
    records::{read_csv, ProductRow},
    sql::StatementEmitter,
};

/// Output lines of one run, preamble first.
#[derive(Debug, PartialEq)]
pub struct Generated {
    pub lines: Vec<String>,
    pub statements: usize,
    pub skipped: usize,
}

#[derive(Debug, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub statements: usize,
    pub skipped: usize,
}

pub fn generate(
    rows: &[ProductRow],
    config: &ImportConfig,
    emitter: &dyn StatementEmitter,
) -> Generated {
    let mut lines = emitter.preamble(config);
    let mut statements = 0;
    let mut skipped = 0;

    for (index, row) in rows.iter().enumerate() {
        match Product::from_row(row, config) {
            Some(product) => {
                lines.push(emitter.emit(&product, config));
                statements += 1;
            }
            None => {
                debug!("skipping data row {}: no product name", index + 1);
                skipped += 1;
            }
        }
    }

    Generated {
        lines,
        statements,
        skipped,
    }
}

/// Writes the lines newline-separated in a single call, replacing whatever
/// the file held before.
pub fn write_output<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<(), ImportError> {
    let path = path.as_ref();
    fs::write(path, lines.join("\n")).map_err(|source| ImportError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

pub fn run(
    config: &ImportConfig,
    emitter: &dyn StatementEmitter,
) -> Result<RunSummary, ImportError> {
    let rows = read_csv(&config.input_path, config.delimiter)?;
    info!(
        "read {} rows from {}",
        rows.len(),
        config.input_path.display()
    );

    let generated = generate(&rows, config, emitter);
    write_output(&config.output_path, &generated.lines)?;
    info!(
        "wrote {} statements to {}",
        generated.statements,
        config.output_path.display()
    );

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        statements: generated.statements,
        skipped: generated.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{LiteralInsert, PreparedInsert};

    fn config_in(dir: &Path, input: &str) -> ImportConfig {
        ImportConfig {
            input_path: PathBuf::from(input),
            output_path: dir.join("import-products.sql"),
            ..ImportConfig::default()
        }
    }

    #[test]
    fn blank_names_drop_one_statement_each() {
        let config = ImportConfig::default();
        let rows = vec![
            ProductRow {
                name: "Rose".to_string(),
                ..ProductRow::default()
            },
            ProductRow::default(),
            ProductRow {
                name: "  ".to_string(),
                ..ProductRow::default()
            },
            ProductRow {
                name: "Iris".to_string(),
                ..ProductRow::default()
            },
        ];

        let generated = generate(&rows, &config, &LiteralInsert);

        assert_eq!(generated.statements, 2);
        assert_eq!(generated.skipped, 2);
        assert_eq!(generated.lines.len(), config.header_lines.len() + 2);
        assert_eq!(generated.lines[..2], config.header_lines[..]);
        assert!(generated.lines[2].contains("'Rose'"));
        assert!(generated.lines[3].contains("'Iris'"));
    }

    #[test]
    fn empty_input_keeps_header() {
        let config = ImportConfig::default();
        let generated = generate(&[], &config, &LiteralInsert);

        assert_eq!(generated.lines, config.header_lines);
        assert_eq!(generated.statements, 0);
    }

    #[test]
    fn two_row_export_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "test-inputs/two_rows.csv");

        let summary = run(&config, &LiteralInsert).unwrap();
        assert_eq!(summary.statements, 1);
        assert_eq!(summary.skipped, 1);

        let output = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(output.matches("INSERT INTO").count(), 1);

        let expected = "-- Auto-generated INSERT statements from MonStock_all.csv
-- TRUNCATE TABLE public.products CASCADE;
INSERT INTO public.products (name, brand, category, cat_15ml, cat_30ml, cat_70ml, \
price_15ml, price_30ml, price_70ml, stock_total, stock_15ml, stock_30ml, stock_70ml, \
alert_threshold) VALUES (
    'Rose',
    'Sans Marque',
    'Fleurs',
    NULL,
    NULL,
    NULL,
    10.0,
    0.0,
    0.0,
    5,
    0,
    0,
    0,
    2
);";
        assert_eq!(output, expected);
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "test-inputs/MonStock_sample.csv");

        run(&config, &LiteralInsert).unwrap();
        let first = fs::read(&config.output_path).unwrap();
        run(&config, &LiteralInsert).unwrap();
        let second = fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "test-inputs/two_rows.csv");
        let stale = "stale content that is much longer than one line\n".repeat(100);
        fs::write(&config.output_path, stale).unwrap();

        run(&config, &LiteralInsert).unwrap();

        let output = fs::read_to_string(&config.output_path).unwrap();
        assert!(!output.contains("stale"));
        assert!(output.starts_with("-- Auto-generated"));
    }

    #[test]
    fn sample_export_with_prepared_statements() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "test-inputs/MonStock_sample.csv");

        let summary = run(&config, &PreparedInsert).unwrap();
        assert_eq!(summary.statements, 3);
        assert_eq!(summary.skipped, 1);

        let output = fs::read_to_string(&config.output_path).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("PREPARE insert_product"));
        assert_eq!(
            lines[3],
            "EXECUTE insert_product('Rose d''Ispahan', 'Maison Lune', 'Floral', 'Mini', NULL, \
'Grand', 12.5, 22.0, 1049.9, 9, 4, 3, 2, 2);"
        );
        assert_eq!(
            lines[4],
            "EXECUTE insert_product('Vétiver', 'Sans Marque', 'Non Classé', NULL, NULL, NULL, \
0.0, 0.0, 5.0, 0, 0, 2, 1, 2);"
        );
        assert!(lines[5].starts_with("EXECUTE insert_product('Ambre', 'Atelier', 'Oriental',"));
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "test-inputs/does_not_exist.csv");

        let result = run(&config, &LiteralInsert);

        assert!(matches!(result, Err(ImportError::OpenInput { .. })));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn unwritable_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = ImportConfig {
            input_path: PathBuf::from("test-inputs/two_rows.csv"),
            output_path: dir.path().join("missing-dir").join("out.sql"),
            ..ImportConfig::default()
        };

        let result = run(&config, &LiteralInsert);

        assert!(matches!(result, Err(ImportError::WriteOutput { .. })));
    }
}
