use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::From;
use std::fmt;

pub use types::{DataType, DataTypeError};

mod types;

/// One column value of a row.
#[derive(Debug, PartialEq, PartialOrd, Ord, Eq, Hash, Clone, Serialize, Deserialize)]
pub enum Datum {
    Int(i32),
    Text(String),
}

/// A row keyed by column name.
pub type Row = HashMap<String, Datum>;

impl From<i32> for Datum {
    fn from(i: i32) -> Datum {
        Datum::Int(i)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Datum {
        Datum::Text(s.to_owned())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Datum {
        Datum::Text(s)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Datum {
        Datum::Int(b as i32)
    }
}

impl Datum {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Text(_) => DataType::Text,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Text is quoted, integers are bare.
impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(d) => write!(f, "{}", d),
            Self::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Build a `Row` from `(column, value)` pairs.
pub fn row<K, V, I>(pairs: I) -> Row
where
    K: Into<String>,
    V: Into<Datum>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_text() {
        assert_eq!(Datum::from(12).to_string(), "12");
        assert_eq!(Datum::from("foo").to_string(), "\"foo\"");
        assert_eq!(Datum::from(true), Datum::Int(1));
        assert_eq!(Datum::from("x").data_type(), DataType::Text);
    }

    #[test]
    fn build_row() {
        let r = row(vec![("a", 1)]);
        assert_eq!(r.get("a"), Some(&Datum::Int(1)));
    }
}
