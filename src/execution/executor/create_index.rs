use crate::ast::CreateIndexStmt;
use crate::catalog::{CatalogError, CatalogManagerRef};
use crate::datum::{row, Datum};
use crate::execution::undo::with_undo;
use crate::execution::{ExecutionError, Executor, QueryResult};
use log::info;

pub struct CreateIndexExecutor {
    catalog: CatalogManagerRef,
    stmt: CreateIndexStmt,
}

impl CreateIndexExecutor {
    pub fn new(catalog: CatalogManagerRef, stmt: CreateIndexStmt) -> Self {
        Self { catalog, stmt }
    }
    fn check_columns(&self) -> Result<(), ExecutionError> {
        let table_name = &self.stmt.table_name;
        let schema = self.catalog.borrow_mut().get_columns(table_name)?;
        if schema.is_empty() {
            return Err(CatalogError::TableNotFound(table_name.clone()).into());
        }
        for column in &self.stmt.columns {
            if !schema.contains(column) {
                return Err(ExecutionError::UnknownColumn {
                    table: table_name.clone(),
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Executor for CreateIndexExecutor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        self.check_columns()?;
        let stmt = &self.stmt;
        info!(
            "create index {} on {} using {}, columns = {:?}",
            stmt.index_name, stmt.table_name, stmt.index_type, stmt.columns
        );
        // only BTREE indices keep their keys unique
        let is_unique = stmt.index_type.eq_ignore_ascii_case("BTREE");
        with_undo(|undo| {
            for (seq, column) in stmt.columns.iter().enumerate() {
                let r = row(vec![
                    ("table_name", Datum::from(stmt.table_name.as_str())),
                    ("index_name", Datum::from(stmt.index_name.as_str())),
                    ("column_name", Datum::from(column.as_str())),
                    ("seq_in_index", Datum::Int(seq as i32 + 1)),
                    ("index_type", Datum::from(stmt.index_type.as_str())),
                    ("is_unique", Datum::from(is_unique)),
                ]);
                let handle = self.catalog.borrow_mut().indices().insert(&r)?;
                let catalog = self.catalog.clone();
                undo.push(format!("remove index column {}", column), move || {
                    catalog.borrow_mut().indices().del(handle)?;
                    Ok(())
                });
            }
            self.catalog
                .borrow()
                .get_index(&stmt.table_name, &stmt.index_name)
                .create()?;
            Ok(QueryResult::message(format!(
                "created index {}",
                stmt.index_name
            )))
        })
    }
}
