use crate::catalog::{CatalogManagerRef, COLUMNS};
use crate::datum::row;
use crate::execution::executor::project_all;
use crate::execution::{ExecutionError, Executor, QueryResult};

pub struct ShowColumnsExecutor {
    catalog: CatalogManagerRef,
    table_name: String,
}

impl ShowColumnsExecutor {
    pub fn new(catalog: CatalogManagerRef, table_name: String) -> Self {
        Self {
            catalog,
            table_name,
        }
    }
}

impl Executor for ShowColumnsExecutor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        let mut catalog = self.catalog.borrow_mut();
        let schema = catalog.get_columns(COLUMNS)?;
        let where_ = row(vec![("table_name", self.table_name.as_str())]);
        let handles = catalog.columns().select_where(&where_)?;
        let rows = project_all(catalog.columns(), handles)?;
        Ok(QueryResult::rows(schema, rows))
    }
}
