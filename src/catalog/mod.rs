use crate::datum::DataType;
use crate::table::{Schema, TableError};
use thiserror::Error;

mod catalog_manager;

pub use catalog_manager::{CatalogManager, CatalogManagerRef};

pub const TABLES: &str = "_tables";
pub const COLUMNS: &str = "_columns";
pub const INDICES: &str = "_indices";

/// the relations that describe every table, themselves included
pub const SCHEMA_TABLES: [&str; 3] = [TABLES, COLUMNS, INDICES];

pub fn is_schema_table(table_name: &str) -> bool {
    SCHEMA_TABLES.contains(&table_name)
}

/// `_tables(table_name)`
pub fn tables_schema() -> Schema {
    Schema::from_slice(&[("table_name", DataType::Text)])
}

/// `_columns(table_name, column_name, data_type)`
pub fn columns_schema() -> Schema {
    Schema::from_slice(&[
        ("table_name", DataType::Text),
        ("column_name", DataType::Text),
        ("data_type", DataType::Text),
    ])
}

/// `_indices(table_name, index_name, column_name, seq_in_index, index_type, is_unique)`
///
/// `is_unique` is kept as an INT flag, 1 or 0.
pub fn indices_schema() -> Schema {
    Schema::from_slice(&[
        ("table_name", DataType::Text),
        ("index_name", DataType::Text),
        ("column_name", DataType::Text),
        ("seq_in_index", DataType::Int),
        ("index_type", DataType::Text),
        ("is_unique", DataType::Int),
    ])
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Table(#[from] TableError),
    #[error("table {0} not found")]
    TableNotFound(String),
}
