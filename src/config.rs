use std::path::PathBuf;

/// Target columns, in the order values are written.
pub const DEFAULT_COLUMNS: [&str; 14] = [
    "name",
    "brand",
    "category",
    "cat_15ml",
    "cat_30ml",
    "cat_70ml",
    "price_15ml",
    "price_30ml",
    "price_70ml",
    "stock_total",
    "stock_15ml",
    "stock_30ml",
    "stock_70ml",
    "alert_threshold",
];

/// Everything the import needs to know besides the data itself.
///
/// `ImportConfig::default()` reproduces the fixed behaviour of the tool:
/// `MonStock_all.csv` in, `import-products.sql` out, `public.products` as
/// the target table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Schema-qualified table name, written as is.
    pub table: String,
    pub columns: [String; 14],
    pub default_brand: String,
    pub default_category: String,
    pub alert_threshold: i64,
    pub delimiter: u8,
    /// Comment lines written before the first statement.
    pub header_lines: Vec<String>,
    /// Schema migration the operator is told to apply before importing.
    pub migration_script: String,
    /// Name of the prepared statement used by `PreparedInsert`.
    pub statement_name: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        let input_path = PathBuf::from("MonStock_all.csv");
        let table = String::from("public.products");

        Self {
            header_lines: vec![
                format!(
                    "-- Auto-generated INSERT statements from {}",
                    input_path.display()
                ),
                format!("-- TRUNCATE TABLE {table} CASCADE;"),
            ],
            input_path,
            output_path: PathBuf::from("import-products.sql"),
            table,
            columns: DEFAULT_COLUMNS.map(String::from),
            default_brand: String::from("Sans Marque"),
            default_category: String::from("Non Classé"),
            alert_threshold: 2,
            delimiter: b';',
            migration_script: String::from("migration-stock-structure.sql"),
            statement_name: String::from("insert_product"),
        }
    }
}

impl ImportConfig {
    pub fn column_list(&self) -> String {
        self.columns.join(", ")
    }
}
