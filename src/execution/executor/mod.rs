use crate::ast::Statement;
use crate::catalog::CatalogManagerRef;
use crate::datum::Row;
use crate::execution::{ExecutionError, QueryResult};
use crate::table::{Handle, HeapTable};

pub use create_index::CreateIndexExecutor;
pub use create_table::CreateTableExecutor;
pub use drop_index::DropIndexExecutor;
pub use drop_table::DropTableExecutor;
pub use show_columns::ShowColumnsExecutor;
pub use show_index::ShowIndexExecutor;
pub use show_tables::ShowTablesExecutor;

mod create_index;
mod create_table;
mod drop_index;
mod drop_table;
mod show_columns;
mod show_index;
mod show_tables;

pub trait Executor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError>;
}

pub enum ExecutorImpl {
    CreateTable(CreateTableExecutor),
    CreateIndex(CreateIndexExecutor),
    DropTable(DropTableExecutor),
    DropIndex(DropIndexExecutor),
    ShowTables(ShowTablesExecutor),
    ShowColumns(ShowColumnsExecutor),
    ShowIndex(ShowIndexExecutor),
}

impl ExecutorImpl {
    /// `None` for statements without an executor.
    pub fn new(catalog: CatalogManagerRef, statement: &Statement) -> Option<Self> {
        let executor = match statement {
            Statement::CreateTable(stmt) => {
                Self::CreateTable(CreateTableExecutor::new(catalog, stmt.clone()))
            }
            Statement::CreateIndex(stmt) => {
                Self::CreateIndex(CreateIndexExecutor::new(catalog, stmt.clone()))
            }
            Statement::DropTable(stmt) => {
                Self::DropTable(DropTableExecutor::new(catalog, stmt.table_name.clone()))
            }
            Statement::DropIndex(stmt) => {
                Self::DropIndex(DropIndexExecutor::new(catalog, stmt.clone()))
            }
            Statement::ShowTables => Self::ShowTables(ShowTablesExecutor::new(catalog)),
            Statement::ShowColumns(stmt) => {
                Self::ShowColumns(ShowColumnsExecutor::new(catalog, stmt.table_name.clone()))
            }
            Statement::ShowIndex(stmt) => {
                Self::ShowIndex(ShowIndexExecutor::new(catalog, stmt.table_name.clone()))
            }
            Statement::Unsupported(_) => return None,
        };
        Some(executor)
    }
    pub fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        match self {
            Self::CreateTable(executor) => executor.execute(),
            Self::CreateIndex(executor) => executor.execute(),
            Self::DropTable(executor) => executor.execute(),
            Self::DropIndex(executor) => executor.execute(),
            Self::ShowTables(executor) => executor.execute(),
            Self::ShowColumns(executor) => executor.execute(),
            Self::ShowIndex(executor) => executor.execute(),
        }
    }
}

/// project every handle onto the columns of `table`'s schema
fn project_all(table: &mut HeapTable, handles: Vec<Handle>) -> Result<Vec<Row>, ExecutionError> {
    let names = table.schema().names();
    let mut rows = vec![];
    for handle in handles {
        rows.push(table.project_columns(handle, &names)?);
    }
    Ok(rows)
}
