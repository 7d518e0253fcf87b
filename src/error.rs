use thiserror::Error;

use crate::mapping::DrawKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{stream} random number {value} is outside {min}..={max}")]
    Domain {
        stream: DrawKind,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("{stream} random numbers: expected {expected} values, got {actual}")]
    LengthMismatch {
        stream: DrawKind,
        expected: usize,
        actual: usize,
    },
    #[error("customers must be between 1 and {max} (got {count})")]
    InvalidCount { count: usize, max: usize },
    #[error("cannot summarize an empty customer table")]
    EmptyInput,
    #[error("invalid random number '{0}'")]
    InvalidRandomNumber(String),
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),
    #[error("invalid newsvendor setup: {0}")]
    InvalidNewsvendor(String),
    #[error("failed to serialize result: {0}")]
    Serialize(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
