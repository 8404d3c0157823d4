//! Statements as handed over by the SQL parser.

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    CreateTable(CreateTableStmt),
    CreateIndex(CreateIndexStmt),
    DropTable(DropTableStmt),
    DropIndex(DropIndexStmt),
    ShowTables,
    ShowColumns(ShowColumnsStmt),
    ShowIndex(ShowIndexStmt),
    /// anything the executor does not handle, e.g. `SELECT`
    Unsupported(String),
}

/// Column types as written in the DDL, not all of them can be stored.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnType {
    Int,
    Text,
    Other(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateTableStmt {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateIndexStmt {
    pub index_name: String,
    pub table_name: String,
    pub index_type: String,
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropTableStmt {
    pub table_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropIndexStmt {
    pub table_name: String,
    pub index_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShowColumnsStmt {
    pub table_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShowIndexStmt {
    pub table_name: String,
}

impl ColumnDefinition {
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_owned(),
            column_type,
        }
    }
}

impl Statement {
    /// `CREATE TABLE table_name (name type, ...)`
    pub fn create_table(table_name: &str, columns: Vec<ColumnDefinition>) -> Self {
        Self::CreateTable(CreateTableStmt {
            table_name: table_name.to_owned(),
            columns,
        })
    }
    /// `CREATE INDEX index_name ON table_name [USING index_type] (column, ...)`
    pub fn create_index(
        index_name: &str,
        table_name: &str,
        index_type: &str,
        columns: &[&str],
    ) -> Self {
        Self::CreateIndex(CreateIndexStmt {
            index_name: index_name.to_owned(),
            table_name: table_name.to_owned(),
            index_type: index_type.to_owned(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        })
    }
    pub fn drop_table(table_name: &str) -> Self {
        Self::DropTable(DropTableStmt {
            table_name: table_name.to_owned(),
        })
    }
    /// `DROP INDEX index_name FROM table_name`
    pub fn drop_index(table_name: &str, index_name: &str) -> Self {
        Self::DropIndex(DropIndexStmt {
            table_name: table_name.to_owned(),
            index_name: index_name.to_owned(),
        })
    }
    pub fn show_columns(table_name: &str) -> Self {
        Self::ShowColumns(ShowColumnsStmt {
            table_name: table_name.to_owned(),
        })
    }
    pub fn show_index(table_name: &str) -> Self {
        Self::ShowIndex(ShowIndexStmt {
            table_name: table_name.to_owned(),
        })
    }
}
