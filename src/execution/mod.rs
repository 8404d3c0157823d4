use crate::ast::Statement;
use crate::catalog::{CatalogError, CatalogManager, CatalogManagerRef};
use crate::index::IndexError;
use crate::storage::StorageEnvRef;
use crate::table::TableError;
use log::info;
use thiserror::Error;

pub use executor::{Executor, ExecutorImpl};
pub use result::QueryResult;

mod executor;
mod result;
pub mod undo;

/// Runs parsed statements against the catalog of one storage environment.
///
/// The catalog is opened by the first statement, not when the engine is
/// built, so an engine that never executes anything touches no files.
pub struct Engine {
    env: StorageEnvRef,
    catalog: Option<CatalogManagerRef>,
}

impl Engine {
    pub fn new(env: StorageEnvRef) -> Self {
        Self { env, catalog: None }
    }
    pub fn catalog(&mut self) -> Result<CatalogManagerRef, ExecutionError> {
        if let Some(catalog) = &self.catalog {
            return Ok(catalog.clone());
        }
        info!("engine: open catalog");
        let catalog = CatalogManager::new_shared(self.env.clone())?;
        self.catalog = Some(catalog.clone());
        Ok(catalog)
    }
    pub fn execute(&mut self, statement: &Statement) -> Result<QueryResult, ExecutionError> {
        info!("engine: execute {:?}", statement);
        let catalog = self.catalog()?;
        match ExecutorImpl::new(catalog, statement) {
            Some(mut executor) => executor.execute(),
            None => Ok(QueryResult::message("not implemented")),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("DbRelationError: {0}")]
    Relation(#[from] TableError),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("index: {0}")]
    Index(#[from] IndexError),
    #[error("cannot drop a schema table")]
    SchemaTable,
    #[error("unrecognized data type {data_type} for column {column}")]
    UnsupportedColumnType { column: String, data_type: String },
    #[error("table {0} already exists")]
    TableExists(String),
    #[error("table {table} does not have column named '{column}'")]
    UnknownColumn { table: String, column: String },
    #[error("table {table} declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },
    #[error("table {0} needs at least one column")]
    NoColumns(String),
    #[error("{0}")]
    Invariant(String),
}
