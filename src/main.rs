use log::info;
use std::error::Error;
use stock_import::{
    config::ImportConfig,
    pipeline::{run, RunSummary},
    sql::LiteralInsert,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = ImportConfig::default();
    println!("Reading {}...", config.input_path.display());

    let summary = run(&config, &LiteralInsert)?;
    info!("{} rows skipped for lack of a name", summary.skipped);
    print_summary(&summary, &config);

    Ok(())
}

fn print_summary(summary: &RunSummary, config: &ImportConfig) {
    println!("✓ Generated {} INSERT statements", summary.statements);
    println!("✓ Saved to {}", summary.output_path.display());
    println!();
    println!("Next steps:");
    println!(
        "1. Run {} on the database to update the table structure",
        config.migration_script
    );
    println!(
        "2. Run {} to import all products",
        summary.output_path.display()
    );
}
