pub mod ast;
pub mod catalog;
pub mod config;
pub mod datum;
pub mod db;
pub mod execution;
pub mod index;
pub mod storage;
pub mod table;

pub use config::Config;
pub use db::{Database, DatabaseError};
