use crate::ast::DropIndexStmt;
use crate::catalog::CatalogManagerRef;
use crate::datum::row;
use crate::execution::{ExecutionError, Executor, QueryResult};

pub struct DropIndexExecutor {
    catalog: CatalogManagerRef,
    stmt: DropIndexStmt,
}

impl DropIndexExecutor {
    pub fn new(catalog: CatalogManagerRef, stmt: DropIndexStmt) -> Self {
        Self { catalog, stmt }
    }
}

impl Executor for DropIndexExecutor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        let (table_name, index_name) = (&self.stmt.table_name, &self.stmt.index_name);
        let mut catalog = self.catalog.borrow_mut();
        catalog.get_index(table_name, index_name).drop()?;
        let where_ = row(vec![
            ("table_name", table_name.as_str()),
            ("index_name", index_name.as_str()),
        ]);
        for handle in catalog.indices().select_where(&where_)? {
            catalog.indices().del(handle)?;
        }
        Ok(QueryResult::message(format!(
            "dropped index {} from {}",
            index_name, table_name
        )))
    }
}
