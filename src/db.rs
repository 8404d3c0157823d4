use crate::ast::Statement;
use crate::config::{Config, ConfigError};
use crate::execution::{Engine, ExecutionError, QueryResult};
use crate::storage::{DiskEnv, MemoryEnv, StorageEnvRef, StorageError};
use log::info;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// The embedding surface: statements in, query results out.
pub struct Database {
    engine: Engine,
}

impl Database {
    pub fn open(config: &Config) -> Result<Self, DatabaseError> {
        let env: StorageEnvRef = if config.in_memory {
            info!("database: in memory");
            Rc::new(MemoryEnv::new())
        } else {
            info!("database: data dir {}", config.data_dir.display());
            Rc::new(DiskEnv::new(&config.data_dir)?)
        };
        Ok(Self::with_env(env))
    }
    pub fn open_config_file<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        Self::open(&Config::from_file(path)?)
    }
    pub fn with_env(env: StorageEnvRef) -> Self {
        Self {
            engine: Engine::new(env),
        }
    }
    pub fn execute(&mut self, statement: &Statement) -> Result<QueryResult, DatabaseError> {
        Ok(self.engine.execute(statement)?)
    }
    /// Execute `statements` in order and concatenate their rendered results.
    /// Stops at the first failure; earlier statements stay applied.
    pub fn run(&mut self, statements: &[Statement]) -> Result<String, DatabaseError> {
        let mut res = "".to_string();
        for stmt in statements {
            res += &self.execute(stmt)?.to_string();
            res += "\n";
        }
        Ok(res)
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ExecutionError: {0}")]
    Execution(#[from] ExecutionError),
}
