//! Error taxonomy for a single lifecycle invocation.
//!
//! Every variant is terminal for the invocation: it is printed and nothing further is
//! sent to the network.

use crate::types::LifecycleOperation;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("{operation} requires at least {required} arguments, received {received}")]
    ArgumentCount {
        operation: LifecycleOperation,
        required: usize,
        received: usize,
    },

    #[error("invalid {field} {value:?}: {source}")]
    NumericParse {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("invalid relay chain ids: {0}")]
    ChainIdFormat(String),

    #[error("failed to read passphrase: {0}")]
    CredentialAcquisition(#[from] std::io::Error),

    #[error("failed to build transaction: {0}")]
    Build(String),

    #[error("failed to submit transaction: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for LifecycleError {
    fn from(err: serde_json::Error) -> Self {
        LifecycleError::Transport(format!("serialization failed: {err}"))
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
