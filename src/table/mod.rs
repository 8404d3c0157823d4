use crate::datum::{DataType, DataTypeError, Datum, Row};
use crate::storage::{HeapFile, PageError, SlottedPage, StorageEnvRef, StorageError};
use log::{debug, info};
use std::convert::TryInto;
use thiserror::Error;

mod rid;
mod schema;

pub use rid::Handle;
pub use schema::{Column, Schema};

/// A row-oriented relation stored in its own heap file.
///
/// Each row is marshaled in schema order:
///
/// ```text
///     INT:  | value: i32 |
///     TEXT: | len: u16 | bytes: [u8; len] |
/// ```
///
/// Nothing else is written, so a record is exactly as long as its values.
pub struct HeapTable {
    name: String,
    schema: Schema,
    file: HeapFile,
}

impl HeapTable {
    pub fn new(name: &str, schema: Schema, env: &StorageEnvRef) -> Self {
        Self {
            name: name.to_owned(),
            schema,
            file: HeapFile::new(name, env),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
    /// corresponds to CREATE TABLE
    pub fn create(&mut self) -> Result<(), TableError> {
        info!("table: create {}", self.name);
        self.file.create()?;
        Ok(())
    }
    /// open the table if its file exists, create it otherwise
    pub fn create_if_not_exists(&mut self) -> Result<(), TableError> {
        match self.file.open() {
            Ok(()) => Ok(()),
            Err(StorageError::NotFound(_)) => self.create(),
            Err(err) => Err(err.into()),
        }
    }
    pub fn open(&mut self) -> Result<(), TableError> {
        self.file.open()?;
        Ok(())
    }
    pub fn close(&mut self) {
        self.file.close();
    }
    /// corresponds to DROP TABLE
    pub fn drop(&mut self) -> Result<(), TableError> {
        info!("table: drop {}", self.name);
        self.file.drop()?;
        Ok(())
    }
    pub fn insert(&mut self, row: &Row) -> Result<Handle, TableError> {
        self.open()?;
        self.validate(row)?;
        let data = self.marshal(row)?;
        let handle = self.append(&data)?;
        debug!("table: insert into {} at {}", self.name, handle);
        Ok(handle)
    }
    pub fn update(&mut self, _handle: Handle, _new_values: &Row) -> Result<(), TableError> {
        Err(TableError::NotImplemented("update"))
    }
    pub fn del(&mut self, handle: Handle) -> Result<(), TableError> {
        self.open()?;
        let mut page = self.file.get(handle.block_id)?;
        page.del(handle.record_id).map_err(|err| match err {
            PageError::RecordNotFound(_) | PageError::InvalidRecordID(_) => {
                TableError::RecordNotFound(handle)
            }
            err => err.into(),
        })?;
        self.file.put(&page)?;
        debug!("table: delete from {} at {}", self.name, handle);
        Ok(())
    }
    /// every live row, in block then record order
    pub fn select(&mut self) -> Result<Vec<Handle>, TableError> {
        self.scan(None)
    }
    /// rows whose values equal every pair in `where_`
    pub fn select_where(&mut self, where_: &Row) -> Result<Vec<Handle>, TableError> {
        for column in where_.keys() {
            self.check_column(column)?;
        }
        self.scan(Some(where_))
    }
    pub fn project(&mut self, handle: Handle) -> Result<Row, TableError> {
        self.open()?;
        let page = self.file.get(handle.block_id)?;
        let data = page
            .get(handle.record_id)
            .ok_or(TableError::RecordNotFound(handle))?;
        self.unmarshal(data)
    }
    pub fn project_columns<S: AsRef<str>>(
        &mut self,
        handle: Handle,
        columns: &[S],
    ) -> Result<Row, TableError> {
        let mut row = self.project(handle)?;
        columns
            .iter()
            .map(|column| -> Result<(String, Datum), TableError> {
                let column = column.as_ref();
                self.check_column(column)?;
                let value = row
                    .remove(column)
                    .ok_or_else(|| TableError::MissingColumn(column.to_owned()))?;
                Ok((column.to_owned(), value))
            })
            .collect()
    }
    pub fn marshal(&self, row: &Row) -> Result<Vec<u8>, TableError> {
        let mut bytes = vec![];
        for column in self.schema.iter() {
            let value = row
                .get(&column.name)
                .ok_or_else(|| TableError::MissingColumn(column.name.clone()))?;
            match (column.data_type, value) {
                (DataType::Int, Datum::Int(n)) => bytes.extend_from_slice(&n.to_le_bytes()),
                (DataType::Text, Datum::Text(s)) => {
                    let len: u16 = s
                        .len()
                        .try_into()
                        .map_err(|_| TableError::TextTooLong(column.name.clone()))?;
                    bytes.extend_from_slice(&len.to_le_bytes());
                    bytes.extend_from_slice(s.as_bytes());
                }
                (expected, _) => {
                    return Err(TableError::TypeMismatch {
                        column: column.name.clone(),
                        expected,
                    })
                }
            }
        }
        Ok(bytes)
    }
    pub fn unmarshal(&self, bytes: &[u8]) -> Result<Row, TableError> {
        let mut row = Row::new();
        let mut offset = 0;
        for column in self.schema.iter() {
            let value = match column.data_type {
                DataType::Int => {
                    let n = self.take(bytes, offset, 4)?;
                    offset += 4;
                    Datum::Int(i32::from_le_bytes([n[0], n[1], n[2], n[3]]))
                }
                DataType::Text => {
                    let len = self.take(bytes, offset, 2)?;
                    let len = u16::from_le_bytes([len[0], len[1]]) as usize;
                    offset += 2;
                    let text = self.take(bytes, offset, len)?;
                    offset += len;
                    let text =
                        String::from_utf8(text.to_vec()).map_err(|_| self.corrupted())?;
                    Datum::Text(text)
                }
            };
            row.insert(column.name.clone(), value);
        }
        if offset != bytes.len() {
            return Err(self.corrupted());
        }
        Ok(row)
    }
    /// every declared column must be given, and nothing else
    fn validate(&self, row: &Row) -> Result<(), TableError> {
        for column in self.schema.iter() {
            if !row.contains_key(&column.name) {
                return Err(TableError::MissingColumn(column.name.clone()));
            }
        }
        for column in row.keys() {
            self.check_column(column)?;
        }
        Ok(())
    }
    fn append(&mut self, data: &[u8]) -> Result<Handle, TableError> {
        if data.len() > SlottedPage::max_record_size() {
            return Err(TableError::RowTooLarge(data.len()));
        }
        let mut page = self.file.get(self.file.last_block_id())?;
        let record_id = match page.add(data) {
            Ok(record_id) => record_id,
            Err(PageError::NoRoom) => {
                page = self.file.get_new();
                page.add(data)?
            }
            Err(err) => return Err(err.into()),
        };
        self.file.put(&page)?;
        Ok(Handle::new(page.block_id(), record_id))
    }
    fn scan(&mut self, where_: Option<&Row>) -> Result<Vec<Handle>, TableError> {
        self.open()?;
        let mut handles = vec![];
        for block_id in self.file.block_ids() {
            let page = self.file.get(block_id)?;
            for record_id in page.ids() {
                if let Some(where_) = where_ {
                    let data = page
                        .get(record_id)
                        .ok_or(TableError::RecordNotFound(Handle::new(block_id, record_id)))?;
                    let row = self.unmarshal(data)?;
                    if !where_.iter().all(|(k, v)| row.get(k) == Some(v)) {
                        continue;
                    }
                }
                handles.push(Handle::new(block_id, record_id));
            }
        }
        Ok(handles)
    }
    fn check_column(&self, column: &str) -> Result<(), TableError> {
        if self.schema.contains(column) {
            Ok(())
        } else {
            Err(TableError::UnknownColumn {
                table: self.name.clone(),
                column: column.to_owned(),
            })
        }
    }
    fn take<'a>(&self, bytes: &'a [u8], offset: usize, len: usize) -> Result<&'a [u8], TableError> {
        bytes.get(offset..offset + len).ok_or_else(|| self.corrupted())
    }
    fn corrupted(&self) -> TableError {
        TableError::Corrupted(self.name.clone())
    }
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("page: {0}")]
    Page(#[from] PageError),
    #[error("{0}")]
    DataType(#[from] DataTypeError),
    #[error("don't know how to handle NULLs, defaults, etc. yet: missing column {0}")]
    MissingColumn(String),
    #[error("table {table} does not have column named '{column}'")]
    UnknownColumn { table: String, column: String },
    #[error("column {column} expects {expected}")]
    TypeMismatch { column: String, expected: DataType },
    #[error("text in column {0} is too long")]
    TextTooLong(String),
    #[error("row of {0} bytes does not fit in a block")]
    RowTooLarge(usize),
    #[error("record of table {0} does not match its schema")]
    Corrupted(String),
    #[error("record {0} not found")]
    RecordNotFound(Handle),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::row;
    use crate::storage::MemoryEnv;
    use itertools::Itertools;
    use rand::Rng;
    use std::rc::Rc;

    fn sample(env: &StorageEnvRef) -> HeapTable {
        let schema = Schema::from_slice(&[("a", DataType::Int), ("b", DataType::Text)]);
        HeapTable::new("_test_data", schema, env)
    }

    #[test]
    fn marshal_unmarshal() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let table = sample(&env);
        let r = row(vec![("a", Datum::Int(-12)), ("b", Datum::from("hello"))]);
        let bytes = table.marshal(&r).unwrap();
        assert_eq!(bytes.len(), 4 + 2 + 5);
        assert_eq!(table.unmarshal(&bytes).unwrap(), r);
        assert!(matches!(
            table.unmarshal(&bytes[..7]),
            Err(TableError::Corrupted(_))
        ));
        let wrong = row(vec![("a", Datum::from("x")), ("b", Datum::from("y"))]);
        assert!(matches!(
            table.marshal(&wrong),
            Err(TableError::TypeMismatch { .. })
        ));
    }

    fn random_text<R: Rng>(rng: &mut R) -> String {
        const ALPHABET: [char; 8] = ['a', 'Z', '0', ' ', '"', '\u{e9}', '\u{2713}', '\u{65e5}'];
        let len = rng.gen_range(0..16);
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
            .collect()
    }

    #[test]
    fn marshal_unmarshal_random_rows() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let schema = Schema::from_slice(&[
            ("a", DataType::Int),
            ("b", DataType::Text),
            ("c", DataType::Text),
            ("d", DataType::Int),
            ("e", DataType::Text),
        ]);
        let table = HeapTable::new("_test_wide", schema, &env);
        let mut rows = vec![
            row(vec![
                ("a", Datum::Int(i32::MIN)),
                ("b", Datum::from("")),
                ("c", Datum::from("\u{e9}\u{2713}")),
                ("d", Datum::Int(0)),
                ("e", Datum::from("")),
            ]),
            row(vec![
                ("a", Datum::Int(i32::MAX)),
                ("b", Datum::from("x")),
                ("c", Datum::from("")),
                ("d", Datum::Int(-1)),
                ("e", Datum::from("\u{65e5}\u{672c}")),
            ]),
        ];
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            rows.push(row(vec![
                ("a", Datum::Int(rng.gen())),
                ("b", Datum::from(random_text(&mut rng))),
                ("c", Datum::from(random_text(&mut rng))),
                ("d", Datum::Int(rng.gen())),
                ("e", Datum::from(random_text(&mut rng))),
            ]));
        }
        for r in rows {
            let bytes = table.marshal(&r).unwrap();
            let text_len: usize = ["b", "c", "e"]
                .iter()
                .map(|c| r[*c].as_str().unwrap().len())
                .sum();
            assert_eq!(bytes.len(), 4 * 2 + 2 * 3 + text_len);
            assert_eq!(table.unmarshal(&bytes).unwrap(), r);
        }
    }

    #[test]
    fn insert_select_project() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let mut table = sample(&env);
        table.create().unwrap();
        let first = row(vec![("a", Datum::Int(12)), ("b", Datum::from("Hello!"))]);
        let second = row(vec![("a", Datum::Int(-192)), ("b", Datum::from("Much"))]);
        table.insert(&first).unwrap();
        table.insert(&second).unwrap();
        let handles = table.select().unwrap();
        assert_eq!(handles, vec![Handle::new(1, 1), Handle::new(1, 2)]);
        assert_eq!(table.project(handles[0]).unwrap(), first);
        assert_eq!(table.project(handles[1]).unwrap(), second);

        let only_b = table.project_columns(handles[1], &["b"]).unwrap();
        assert_eq!(only_b, row(vec![("b", "Much")]));
        assert!(matches!(
            table.project_columns(handles[1], &["c"]),
            Err(TableError::UnknownColumn { .. })
        ));

        let where_ = row(vec![("a", -192)]);
        assert_eq!(table.select_where(&where_).unwrap(), vec![handles[1]]);
        let where_ = row(vec![("a", Datum::Int(12)), ("b", Datum::from("Much"))]);
        assert!(table.select_where(&where_).unwrap().is_empty());
        table.drop().unwrap();
    }

    #[test]
    fn insert_requires_every_column() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let mut table = sample(&env);
        table.create().unwrap();
        let partial = row(vec![("a", 1)]);
        assert!(matches!(
            table.insert(&partial),
            Err(TableError::MissingColumn(_))
        ));
        let extra = row(vec![
            ("a", Datum::Int(1)),
            ("b", Datum::from("x")),
            ("c", Datum::Int(2)),
        ]);
        assert!(matches!(
            table.insert(&extra),
            Err(TableError::UnknownColumn { .. })
        ));
        assert!(table.select().unwrap().is_empty());
    }

    #[test]
    fn spills_to_new_blocks() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let mut table = sample(&env);
        table.create().unwrap();
        let text = "x".repeat(500);
        let handles = (0..20)
            .map(|i| {
                table
                    .insert(&row(vec![("a", Datum::Int(i)), ("b", Datum::from(text.as_str()))]))
                    .unwrap()
            })
            .collect_vec();
        assert!(handles.last().unwrap().block_id > 1);
        assert_eq!(table.select().unwrap(), handles);
        for (i, handle) in handles.iter().enumerate() {
            let value = table.project_columns(*handle, &["a"]).unwrap();
            assert_eq!(value["a"], Datum::Int(i as i32));
        }
        let too_big = row(vec![("a", Datum::Int(0)), ("b", Datum::from("y".repeat(5000)))]);
        assert!(matches!(
            table.insert(&too_big),
            Err(TableError::RowTooLarge(_))
        ));
    }

    #[test]
    fn delete_and_update() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let mut table = sample(&env);
        table.create().unwrap();
        let handles = (0..3)
            .map(|i| {
                table
                    .insert(&row(vec![("a", Datum::Int(i)), ("b", Datum::from("v"))]))
                    .unwrap()
            })
            .collect_vec();
        table.del(handles[1]).unwrap();
        assert_eq!(table.select().unwrap(), vec![handles[0], handles[2]]);
        assert!(matches!(
            table.project(handles[1]),
            Err(TableError::RecordNotFound(_))
        ));
        assert!(matches!(
            table.del(handles[1]),
            Err(TableError::RecordNotFound(_))
        ));
        assert_eq!(table.project(handles[2]).unwrap()["a"], Datum::Int(2));
        assert!(matches!(
            table.update(handles[0], &Row::new()),
            Err(TableError::NotImplemented(_))
        ));
    }

    #[test]
    fn create_if_not_exists_reopens() {
        let env: StorageEnvRef = Rc::new(MemoryEnv::new());
        let mut table = sample(&env);
        table.create_if_not_exists().unwrap();
        table.insert(&row(vec![("a", Datum::Int(7)), ("b", Datum::from("kept"))])).unwrap();
        table.close();

        let mut again = sample(&env);
        again.create_if_not_exists().unwrap();
        assert_eq!(again.select().unwrap().len(), 1);
        assert!(matches!(
            sample(&env).create(),
            Err(TableError::Storage(StorageError::AlreadyExists(_)))
        ));
    }
}
