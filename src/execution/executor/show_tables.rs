use crate::catalog::{is_schema_table, CatalogManagerRef, TABLES};
use crate::execution::executor::project_all;
use crate::execution::{ExecutionError, Executor, QueryResult};

/// Lists user tables, the schema relations are left out.
pub struct ShowTablesExecutor {
    catalog: CatalogManagerRef,
}

impl ShowTablesExecutor {
    pub fn new(catalog: CatalogManagerRef) -> Self {
        Self { catalog }
    }
}

impl Executor for ShowTablesExecutor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        let mut catalog = self.catalog.borrow_mut();
        let schema = catalog.get_columns(TABLES)?;
        let handles = catalog.tables().select()?;
        let rows = project_all(catalog.tables(), handles)?
            .into_iter()
            .filter(|r| {
                r.get("table_name")
                    .and_then(|d| d.as_str())
                    .map_or(false, |name| !is_schema_table(name))
            })
            .collect();
        Ok(QueryResult::rows(schema, rows))
    }
}
