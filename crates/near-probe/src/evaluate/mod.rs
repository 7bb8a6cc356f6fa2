//! Pure evaluation of RPC responses into status records.
//!
//! Evaluators never perform I/O: they take an [`RpcOutcome`] plus the
//! configured target and return an [`Evaluation`]. Errors reported by the
//! node become [`Evaluation::RpcError`]; faults in the data itself are
//! [`EvalError`]s.

use crate::rpc::{RpcError, RpcOutcome};
use serde::Serialize;
use std::fmt;

pub mod genesis;
pub mod node;
pub mod validator;

pub use genesis::GenesisStatus;
pub use node::NodeStatus;
pub use validator::ValidatorStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evaluation<T> {
    Status(T),
    RpcError(ErrorReport),
}

impl<T> Evaluation<T> {
    /// Runs `f` on a successful outcome and turns a node error into a report
    pub(crate) fn from_outcome<R, E>(
        outcome: RpcOutcome<R>,
        f: impl FnOnce(R) -> Result<T, E>,
    ) -> Result<Self, E> {
        match outcome {
            RpcOutcome::Success(response) => f(response).map(Evaluation::Status),
            RpcOutcome::Failure(error) => Ok(Evaluation::RpcError(error.into())),
        }
    }
}

/// Node-reported error, flattened for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error_name: String,
    pub error_cause_name: String,
    pub error_info: String,
}

impl From<RpcError> for ErrorReport {
    fn from(error: RpcError) -> Self {
        let error_name = if error.name.is_empty() {
            format!("RPC_ERROR_{}", error.code)
        } else {
            error.name
        };

        let (error_cause_name, error_info) = match error.cause {
            Some(cause) => (cause.name, info_text(cause.info)),
            None => ("UNKNOWN".to_string(), error.message),
        };

        Self {
            error_name,
            error_cause_name,
            error_info,
        }
    }
}

fn info_text(info: serde_json::Value) -> String {
    match info {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Blocks,
    Chunks,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Production::Blocks => write!(f, "blocks"),
            Production::Chunks => write!(f, "chunks"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("validator {account_id} has no expected {production}, uptime is undefined")]
    DivisionByZero {
        account_id: String,
        production: Production,
    },
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
}
