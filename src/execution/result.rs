use crate::datum::{DataType, Row};
use crate::table::Schema;
use itertools::Itertools;
use prettytable::{Cell, Row as TableRow, Table};
use std::fmt;

/// What a statement hands back: a status message, optionally preceded by
/// a result set with its column names and types.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    schema: Option<Schema>,
    rows: Vec<Row>,
    message: String,
}

impl QueryResult {
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self {
            schema: None,
            rows: vec![],
            message: message.into(),
        }
    }
    /// `rows` with their columns described by `schema`, closed by the usual
    /// `successfully returned N rows`
    pub fn rows(schema: Schema, rows: Vec<Row>) -> Self {
        let message = format!("successfully returned {} rows", rows.len());
        Self {
            schema: Some(schema),
            rows,
            message,
        }
    }
    pub fn column_names(&self) -> Option<Vec<String>> {
        self.schema.as_ref().map(Schema::names)
    }
    pub fn column_attributes(&self) -> Option<Vec<DataType>> {
        self.schema.as_ref().map(Schema::data_types)
    }
    pub fn get_rows(&self) -> &[Row] {
        &self.rows
    }
    pub fn get_message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            let mut table = Table::new();
            let header = schema
                .iter()
                .map(|c| Cell::new(c.name.as_str()))
                .collect_vec();
            table.add_row(TableRow::new(header));
            for row in &self.rows {
                let cells = schema
                    .iter()
                    .map(|c| {
                        let value = row.get(&c.name).map(|d| d.to_string()).unwrap_or_default();
                        Cell::new(value.as_str())
                    })
                    .collect_vec();
                table.add_row(TableRow::new(cells));
            }
            write!(f, "{}", table)?;
        }
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::row;

    #[test]
    fn message_only() {
        let result = QueryResult::message("created foo");
        assert_eq!(result.column_names(), None);
        assert!(result.get_rows().is_empty());
        assert_eq!(result.to_string(), "created foo");
    }

    #[test]
    fn rows_are_rendered() {
        let schema = Schema::from_slice(&[("table_name", DataType::Text), ("n", DataType::Int)]);
        let result = QueryResult::rows(
            schema,
            vec![row(vec![
                ("table_name", crate::datum::Datum::from("foo")),
                ("n", crate::datum::Datum::Int(7)),
            ])],
        );
        assert_eq!(
            result.column_names(),
            Some(vec!["table_name".to_string(), "n".to_string()])
        );
        assert_eq!(
            result.column_attributes(),
            Some(vec![DataType::Text, DataType::Int])
        );
        let text = result.to_string();
        assert!(text.contains("table_name"));
        assert!(text.contains("\"foo\""));
        assert!(text.contains('7'));
        assert!(text.ends_with("successfully returned 1 rows"));
    }
}
