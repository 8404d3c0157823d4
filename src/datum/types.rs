use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column types a heap table knows how to marshal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int,
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Int => "INT",
                Self::Text => "TEXT",
            }
        )
    }
}

/// Parses the names stored in `_columns.data_type`.
impl FromStr for DataType {
    type Err = DataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INT" | "INTEGER" => Ok(Self::Int),
            "TEXT" => Ok(Self::Text),
            _ => Err(DataTypeError::Unsupported(s.to_owned())),
        }
    }
}

#[derive(Error, Debug)]
pub enum DataTypeError {
    #[error("unsupported data type {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("int".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("INTEGER".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("Text".parse::<DataType>().unwrap(), DataType::Text);
        assert!("BOOLEAN".parse::<DataType>().is_err());
        assert_eq!(DataType::Text.to_string(), "TEXT");
        assert_eq!(DataType::Int.to_string().parse::<DataType>().unwrap(), DataType::Int);
    }
}
