//! Error types for the conversion pipeline.
//!
//! Only conditions the caller can act on live here. Characters that cannot be
//! encoded or decoded are never errors: they are substituted or replaced inside
//! the transformers.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("chunk_size must be between 1 byte and 64 MiB, got {0}")]
    InvalidChunkSize(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = ConvError> = std::result::Result<T, E>;
