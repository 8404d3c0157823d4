use crate::catalog::{CatalogManagerRef, INDICES};
use crate::datum::row;
use crate::execution::executor::project_all;
use crate::execution::{ExecutionError, Executor, QueryResult};

pub struct ShowIndexExecutor {
    catalog: CatalogManagerRef,
    table_name: String,
}

impl ShowIndexExecutor {
    pub fn new(catalog: CatalogManagerRef, table_name: String) -> Self {
        Self {
            catalog,
            table_name,
        }
    }
}

impl Executor for ShowIndexExecutor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        let mut catalog = self.catalog.borrow_mut();
        let schema = catalog.get_columns(INDICES)?;
        let where_ = row(vec![("table_name", self.table_name.as_str())]);
        let handles = catalog.indices().select_where(&where_)?;
        let rows = project_all(catalog.indices(), handles)?;
        Ok(QueryResult::rows(schema, rows))
    }
}
