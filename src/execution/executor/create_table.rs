use crate::ast::{ColumnDefinition, ColumnType, CreateTableStmt};
use crate::catalog::{CatalogManager, CatalogManagerRef, TABLES};
use crate::datum::{row, DataType};
use crate::execution::undo::with_undo;
use crate::execution::{ExecutionError, Executor, QueryResult};
use crate::table::{Column, Schema};
use log::info;
use std::collections::HashSet;

pub struct CreateTableExecutor {
    catalog: CatalogManagerRef,
    stmt: CreateTableStmt,
}

impl CreateTableExecutor {
    pub fn new(catalog: CatalogManagerRef, stmt: CreateTableStmt) -> Self {
        Self { catalog, stmt }
    }
    /// Columns as declared. Nothing is written for an empty list, a repeated
    /// name or a type that cannot be stored.
    fn schema(&self) -> Result<Schema, ExecutionError> {
        let table_name = &self.stmt.table_name;
        if self.stmt.columns.is_empty() {
            return Err(ExecutionError::NoColumns(table_name.clone()));
        }
        let mut seen = HashSet::new();
        for column in &self.stmt.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ExecutionError::DuplicateColumn {
                    table: table_name.clone(),
                    column: column.name.clone(),
                });
            }
        }
        let columns = self
            .stmt
            .columns
            .iter()
            .map(column_definition)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schema::new(columns))
    }
}

fn column_definition(definition: &ColumnDefinition) -> Result<Column, ExecutionError> {
    let data_type = match &definition.column_type {
        ColumnType::Int => DataType::Int,
        ColumnType::Text => DataType::Text,
        ColumnType::Other(other) => {
            return Err(ExecutionError::UnsupportedColumnType {
                column: definition.name.clone(),
                data_type: other.clone(),
            })
        }
    };
    Ok(Column::new(&definition.name, data_type))
}

impl Executor for CreateTableExecutor {
    fn execute(&mut self) -> Result<QueryResult, ExecutionError> {
        let table_name = self.stmt.table_name.clone();
        // every column type is checked before anything is written
        let schema = self.schema()?;
        if self.catalog.borrow_mut().table_exists(&table_name)? {
            return Err(ExecutionError::TableExists(table_name));
        }
        info!("create table {}, columns = {:?}", table_name, schema.names());
        with_undo(|undo| {
            let handle = self
                .catalog
                .borrow_mut()
                .tables()
                .insert(&row(vec![("table_name", table_name.as_str())]))?;
            let catalog = self.catalog.clone();
            let name = table_name.clone();
            undo.push(format!("remove {} from {}", name, TABLES), move || {
                let mut catalog = catalog.borrow_mut();
                catalog.forget_table(&name);
                catalog.tables().del(handle)?;
                Ok(())
            });
            for column in schema.iter() {
                let r = CatalogManager::column_row(&table_name, column);
                let handle = self.catalog.borrow_mut().columns().insert(&r)?;
                let catalog = self.catalog.clone();
                undo.push(format!("remove column {}", column.name), move || {
                    catalog.borrow_mut().columns().del(handle)?;
                    Ok(())
                });
            }
            self.catalog
                .borrow_mut()
                .get_table(&table_name)?
                .create()?;
            Ok(QueryResult::message(format!("created {}", table_name)))
        })
    }
}
