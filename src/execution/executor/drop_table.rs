use crate::catalog::{is_schema_table, CatalogManagerRef, TABLES};
use crate::datum::row;
use crate::execution::{ExecutionError, Executor, QueryResult};
use log::info;

pub struct DropTableExecutor {
    catalog: CatalogManagerRef,
    table_name: String,
}

impl DropTableExecutor {
    pub fn new(catalog: CatalogManagerRef, table_name: String) -> Self {
        Self {
            catalog,
            table_name,
        }
    }
}

impl Executor for DropTableExecutor {
    /// Indices go first, then the table file and its columns, and the
    /// `_tables` row last. A failure part way leaves what was already removed.
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        let table_name = self.table_name.as_str();
        if is_schema_table(table_name) {
            return Err(ExecutionError::SchemaTable);
        }
        let mut catalog = self.catalog.borrow_mut();
        // fails for an unknown table before anything is touched
        catalog.get_table(table_name)?;
        let where_ = row(vec![("table_name", table_name)]);
        let table_rows = catalog.tables().select_where(&where_)?;
        if table_rows.len() != 1 {
            return Err(ExecutionError::Invariant(format!(
                "expected one row for {} in {}, found {}",
                table_name,
                TABLES,
                table_rows.len()
            )));
        }

        for index_name in catalog.get_index_names(table_name)? {
            info!("drop table {}: drop index {}", table_name, index_name);
            catalog.get_index(table_name, &index_name).drop()?;
        }
        for handle in catalog.indices().select_where(&where_)? {
            catalog.indices().del(handle)?;
        }

        catalog.get_table(table_name)?.drop()?;
        catalog.forget_table(table_name);
        for handle in catalog.columns().select_where(&where_)? {
            catalog.columns().del(handle)?;
        }
        catalog.tables().del(table_rows[0])?;
        info!("dropped table {}", table_name);
        Ok(QueryResult::message(format!("dropped {}", table_name)))
    }
}
