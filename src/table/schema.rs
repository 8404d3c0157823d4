use crate::datum::DataType;
use itertools::Itertools;
use std::slice::Iter;

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Column {
            name: name.to_owned(),
            data_type,
        }
    }
}

/// Ordered column list, the order decides the byte layout of a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }
    pub fn from_slice(names_and_types: &[(&str, DataType)]) -> Self {
        Self::new(
            names_and_types
                .iter()
                .map(|(name, data_type)| Column::new(name, *data_type))
                .collect_vec(),
        )
    }
    pub fn len(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
    pub fn iter(&self) -> Iter<Column> {
        self.columns.iter()
    }
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect_vec()
    }
    pub fn data_types(&self) -> Vec<DataType> {
        self.columns.iter().map(|c| c.data_type).collect_vec()
    }
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
