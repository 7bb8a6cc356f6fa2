use serde::{Deserialize, Serialize};

/// Result of the `status` method
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub protocol_version: u32,
    pub latest_protocol_version: u32,
    pub sync_info: SyncInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncInfo {
    pub latest_block_height: u64,
    pub latest_block_time: String,
    #[serde(default)]
    pub syncing: bool,
}

/// Result of the `validators` method
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorsResponse {
    pub current_validators: Vec<CurrentValidator>,
    pub next_validators: Vec<NextValidator>,
    #[serde(default)]
    pub epoch_height: u64,
}

/// A validator of the current epoch with its production counters
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentValidator {
    pub account_id: String,
    pub num_produced_blocks: u64,
    pub num_expected_blocks: u64,
    pub num_produced_chunks: u64,
    pub num_expected_chunks: u64,
    pub is_slashed: bool,
}

/// A validator selected for the next epoch
#[derive(Debug, Clone, Deserialize)]
pub struct NextValidator {
    pub account_id: String,
}

/// Result of the `EXPERIMENTAL_protocol_config` method
#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolConfigResponse {
    pub protocol_version: u32,
    pub genesis_time: String,
    pub genesis_height: u64,
}

/// Error object carried by a JSON-RPC response instead of a result
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcError {
    #[serde(default)]
    pub name: String,
    pub cause: Option<ErrorCause>,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorCause {
    pub name: String,
    #[serde(default)]
    pub info: serde_json::Value,
}

/// Which epoch the `validators` method should describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpochReference {
    Latest,
    EpochId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncCheckpoint {
    Genesis,
    EarliestAvailable,
}

/// Either the decoded result or the error reported by the node.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome<T> {
    Success(T),
    Failure(RpcError),
}

#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

impl<T> Envelope<T> {
    pub(crate) fn into_outcome(self) -> eyre::Result<RpcOutcome<T>> {
        match (self.error, self.result) {
            (Some(error), _) => Ok(RpcOutcome::Failure(error)),
            (None, Some(result)) => Ok(RpcOutcome::Success(result)),
            (None, None) => Err(eyre::eyre!("No result in RPC response")),
        }
    }
}
