use super::{EvalError, Evaluation};
use crate::rpc::{ProtocolConfigResponse, RpcOutcome};
use serde::Serialize;

/// Length of `YYYY-MM-DDTHH:MM:SS`
const TIMESTAMP_LEN: usize = 19;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisStatus {
    pub genesis_time: String,
    pub genesis_height: u64,
    pub protocol_version: u32,
    /// Genesis is above the configured reference height
    pub hardfork_required: bool,
}

pub fn evaluate(
    outcome: RpcOutcome<ProtocolConfigResponse>,
    block_height: u64,
) -> Result<Evaluation<GenesisStatus>, EvalError> {
    Evaluation::from_outcome(outcome, |config| -> Result<GenesisStatus, EvalError> {
        Ok(GenesisStatus {
            genesis_time: truncate_timestamp(&config.genesis_time)?,
            genesis_height: config.genesis_height,
            protocol_version: config.protocol_version,
            hardfork_required: config.genesis_height > block_height,
        })
    })
}

/// Drops fractional seconds and zone from an RFC 3339 timestamp
fn truncate_timestamp(timestamp: &str) -> Result<String, EvalError> {
    let truncated: String = timestamp.chars().take(TIMESTAMP_LEN).collect();
    if truncated.chars().count() < TIMESTAMP_LEN {
        return Err(EvalError::MalformedTimestamp(timestamp.to_string()));
    }
    Ok(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{ErrorCause, RpcError};
    use serde_json::json;

    fn config(genesis_height: u64, genesis_time: &str) -> RpcOutcome<ProtocolConfigResponse> {
        RpcOutcome::Success(ProtocolConfigResponse {
            protocol_version: 49,
            genesis_time: genesis_time.to_string(),
            genesis_height,
        })
    }

    #[test]
    fn test_hardfork_required() {
        let evaluation = evaluate(config(9820210, "2022-06-20T11:30:42.345678Z"), 9000000).unwrap();

        assert_eq!(
            evaluation,
            Evaluation::Status(GenesisStatus {
                genesis_time: "2022-06-20T11:30:42".to_string(),
                genesis_height: 9820210,
                protocol_version: 49,
                hardfork_required: true,
            })
        );
    }

    #[test]
    fn test_no_hardfork_at_threshold() {
        let Evaluation::Status(status) =
            evaluate(config(9000000, "2022-06-20T11:30:42Z"), 9000000).unwrap()
        else {
            panic!("expected a status");
        };
        assert!(!status.hardfork_required);
        assert_eq!(status.genesis_time, "2022-06-20T11:30:42");
    }

    #[test]
    fn test_malformed_genesis_time() {
        assert_eq!(
            evaluate(config(1, "2022-06-20"), 0).unwrap_err(),
            EvalError::MalformedTimestamp("2022-06-20".to_string())
        );
    }

    #[test]
    fn test_error_object() {
        let error = RpcError {
            name: "HANDLER_ERROR".to_string(),
            cause: Some(ErrorCause {
                name: "UNKNOWN_BLOCK".to_string(),
                info: json!({}),
            }),
            code: -32000,
            message: "Server error".to_string(),
        };

        let Evaluation::RpcError(report) = evaluate(RpcOutcome::Failure(error), 9000000).unwrap()
        else {
            panic!("expected an error report");
        };
        assert_eq!(report.error_name, "HANDLER_ERROR");
        assert_eq!(report.error_cause_name, "UNKNOWN_BLOCK");
        assert_eq!(report.error_info, "{}");
    }
}
