use super::Evaluation;
use crate::rpc::{RpcOutcome, StatusResponse};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStatus {
    /// The network runs a newer protocol than this node
    pub protocol_version_gap: bool,
    pub latest_block_time: String,
    pub latest_block_height: u64,
    pub protocol_version: u32,
    pub latest_protocol_version: u32,
    pub syncing: bool,
}

pub fn evaluate(outcome: RpcOutcome<StatusResponse>) -> Evaluation<NodeStatus> {
    match outcome {
        RpcOutcome::Success(status) => Evaluation::Status(NodeStatus {
            protocol_version_gap: status.latest_protocol_version > status.protocol_version,
            latest_block_time: status.sync_info.latest_block_time,
            latest_block_height: status.sync_info.latest_block_height,
            protocol_version: status.protocol_version,
            latest_protocol_version: status.latest_protocol_version,
            syncing: status.sync_info.syncing,
        }),
        RpcOutcome::Failure(error) => Evaluation::RpcError(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::ErrorReport;
    use crate::rpc::{ErrorCause, RpcError, SyncInfo};
    use serde_json::json;

    fn status(protocol_version: u32, latest_protocol_version: u32) -> StatusResponse {
        StatusResponse {
            protocol_version,
            latest_protocol_version,
            sync_info: SyncInfo {
                latest_block_height: 1_500_000,
                latest_block_time: "2022-08-01T10:00:00.123456789Z".to_string(),
                syncing: false,
            },
        }
    }

    #[test]
    fn test_protocol_version_gap() {
        let Evaluation::Status(node) = evaluate(RpcOutcome::Success(status(62, 63))) else {
            panic!("expected a status");
        };
        assert!(node.protocol_version_gap);
        assert_eq!(node.latest_block_time, "2022-08-01T10:00:00.123456789Z");
    }

    #[test]
    fn test_no_gap_when_up_to_date() {
        let Evaluation::Status(node) = evaluate(RpcOutcome::Success(status(63, 63))) else {
            panic!("expected a status");
        };
        assert!(!node.protocol_version_gap);
    }

    #[test]
    fn test_error_object() {
        let error = RpcError {
            name: "HANDLER_ERROR".to_string(),
            cause: Some(ErrorCause {
                name: "NO_SYNCED_BLOCKS".to_string(),
                info: json!("node is still syncing"),
            }),
            code: -32000,
            message: "Server error".to_string(),
        };

        assert_eq!(
            evaluate(RpcOutcome::Failure(error)),
            Evaluation::RpcError(ErrorReport {
                error_name: "HANDLER_ERROR".to_string(),
                error_cause_name: "NO_SYNCED_BLOCKS".to_string(),
                error_info: "node is still syncing".to_string(),
            })
        );
    }
}
