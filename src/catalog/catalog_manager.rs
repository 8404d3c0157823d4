use crate::catalog::{
    columns_schema, indices_schema, tables_schema, CatalogError, COLUMNS, INDICES,
    SCHEMA_TABLES, TABLES,
};
use crate::datum::{row, DataType, Datum, Row};
use crate::index::DbIndex;
use crate::storage::StorageEnvRef;
use crate::table::{Column, HeapTable, Schema, TableError};
use itertools::Itertools;
use log::info;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Owns the three schema relations and a handle cache for user tables.
///
/// The schema relations have hard-coded schemas, their own rows in
/// `_tables` and `_columns` are written once when their files are created,
/// so nothing here looks a schema relation up recursively.
pub struct CatalogManager {
    env: StorageEnvRef,
    tables: HeapTable,
    columns: HeapTable,
    indices: HeapTable,
    table_cache: HashMap<String, HeapTable>,
}

pub type CatalogManagerRef = Rc<RefCell<CatalogManager>>;

impl CatalogManager {
    pub fn new(env: StorageEnvRef) -> Result<Self, CatalogError> {
        let mut tables = HeapTable::new(TABLES, tables_schema(), &env);
        let mut columns = HeapTable::new(COLUMNS, columns_schema(), &env);
        let mut indices = HeapTable::new(INDICES, indices_schema(), &env);
        tables.create_if_not_exists()?;
        columns.create_if_not_exists()?;
        indices.create_if_not_exists()?;
        let mut catalog = Self {
            env,
            tables,
            columns,
            indices,
            table_cache: HashMap::new(),
        };
        catalog.bootstrap()?;
        Ok(catalog)
    }
    pub fn new_shared(env: StorageEnvRef) -> Result<CatalogManagerRef, CatalogError> {
        Ok(Rc::new(RefCell::new(Self::new(env)?)))
    }
    fn bootstrap(&mut self) -> Result<(), CatalogError> {
        if self.tables.select()?.is_empty() {
            info!("catalog: bootstrap {}", TABLES);
            for table_name in SCHEMA_TABLES.iter() {
                self.tables.insert(&row(vec![("table_name", *table_name)]))?;
            }
        }
        if self.columns.select()?.is_empty() {
            info!("catalog: bootstrap {}", COLUMNS);
            let schemas = vec![
                (TABLES, tables_schema()),
                (COLUMNS, columns_schema()),
                (INDICES, indices_schema()),
            ];
            for (table_name, schema) in schemas {
                for column in schema.iter() {
                    self.columns.insert(&Self::column_row(table_name, column))?;
                }
            }
        }
        Ok(())
    }
    /// a `_columns` row describing `column` of `table_name`
    pub fn column_row(table_name: &str, column: &Column) -> Row {
        row(vec![
            ("table_name", table_name.to_owned()),
            ("column_name", column.name.clone()),
            ("data_type", column.data_type.to_string()),
        ])
    }
    pub fn tables(&mut self) -> &mut HeapTable {
        &mut self.tables
    }
    pub fn columns(&mut self) -> &mut HeapTable {
        &mut self.columns
    }
    pub fn indices(&mut self) -> &mut HeapTable {
        &mut self.indices
    }
    /// The relation for `table_name`. A cached handle keeps the schema it
    /// was built with, a new one takes its schema from `_columns`.
    pub fn get_table(&mut self, table_name: &str) -> Result<&mut HeapTable, CatalogError> {
        match table_name {
            TABLES => return Ok(&mut self.tables),
            COLUMNS => return Ok(&mut self.columns),
            INDICES => return Ok(&mut self.indices),
            _ => {}
        }
        if !self.table_cache.contains_key(table_name) {
            let schema = self.get_columns(table_name)?;
            if schema.is_empty() {
                return Err(CatalogError::TableNotFound(table_name.to_owned()));
            }
            info!("catalog: open {} with {:?}", table_name, schema.names());
            let table = HeapTable::new(table_name, schema, &self.env);
            return Ok(self
                .table_cache
                .entry(table_name.to_owned())
                .or_insert(table));
        }
        self.table_cache
            .get_mut(table_name)
            .ok_or_else(|| CatalogError::TableNotFound(table_name.to_owned()))
    }
    /// whether `_tables` has a row for `table_name`
    pub fn table_exists(&mut self, table_name: &str) -> Result<bool, CatalogError> {
        let where_ = row(vec![("table_name", table_name)]);
        Ok(!self.tables.select_where(&where_)?.is_empty())
    }
    /// drop the cached handle so the next `get_table` reads `_columns` again
    pub fn forget_table(&mut self, table_name: &str) {
        if let Some(mut table) = self.table_cache.remove(table_name) {
            table.close();
        }
    }
    /// Schema of `table_name` in the order its rows were inserted into
    /// `_columns`; empty if the table is unknown.
    pub fn get_columns(&mut self, table_name: &str) -> Result<Schema, CatalogError> {
        let where_ = row(vec![("table_name", table_name)]);
        let handles = self.columns.select_where(&where_)?;
        let mut columns = vec![];
        for handle in handles {
            let r = self
                .columns
                .project_columns(handle, &["column_name", "data_type"])?;
            let data_type = text(&r, "data_type")?
                .parse::<DataType>()
                .map_err(TableError::from)?;
            columns.push(Column::new(&text(&r, "column_name")?, data_type));
        }
        Ok(Schema::new(columns))
    }
    pub fn get_index(&self, table_name: &str, index_name: &str) -> DbIndex {
        DbIndex::new(table_name, index_name, &self.env)
    }
    /// distinct index names recorded for `table_name`, in catalog order
    pub fn get_index_names(&mut self, table_name: &str) -> Result<Vec<String>, CatalogError> {
        let where_ = row(vec![("table_name", table_name)]);
        let handles = self.indices.select_where(&where_)?;
        let mut names = vec![];
        for handle in handles {
            let r = self.indices.project_columns(handle, &["index_name"])?;
            names.push(text(&r, "index_name")?);
        }
        Ok(names.into_iter().unique().collect_vec())
    }
}

fn text(r: &Row, column: &str) -> Result<String, CatalogError> {
    r.get(column)
        .and_then(Datum::as_str)
        .map(str::to_owned)
        .ok_or_else(|| TableError::Corrupted(COLUMNS.to_owned()).into())
}
