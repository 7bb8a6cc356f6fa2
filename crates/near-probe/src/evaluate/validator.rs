use super::{EvalError, Evaluation, Production};
use crate::rpc::{CurrentValidator, RpcOutcome, ValidatorsResponse};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorStatus {
    /// Part of the current validator set
    pub joined: bool,
    /// Only computed when not joined
    pub expected_to_join_next: Option<bool>,
    pub slashed: bool,
    pub produced_chunks: u64,
    /// Only computed when joined, in [0, 1]
    pub uptime_ratio: Option<f64>,
}

/// Looks up `target` in the validator sets. Account ids are matched by
/// substring, so a pool name also matches its full `*.factory.*` id.
pub fn evaluate(
    outcome: RpcOutcome<ValidatorsResponse>,
    target: &str,
) -> Result<Evaluation<ValidatorStatus>, EvalError> {
    Evaluation::from_outcome(outcome, |response| -> Result<ValidatorStatus, EvalError> {
        let current = response
            .current_validators
            .iter()
            .find(|validator| validator.account_id.contains(target));

        match current {
            Some(validator) => Ok(ValidatorStatus {
                joined: true,
                expected_to_join_next: None,
                slashed: validator.is_slashed,
                produced_chunks: validator.num_produced_chunks,
                uptime_ratio: Some(uptime_ratio(validator)?),
            }),
            None => Ok(ValidatorStatus {
                joined: false,
                expected_to_join_next: Some(
                    response
                        .next_validators
                        .iter()
                        .any(|validator| validator.account_id.contains(target)),
                ),
                slashed: false,
                produced_chunks: 0,
                uptime_ratio: None,
            }),
        }
    })
}

/// Mean of the block and chunk production ratios
pub fn uptime_ratio(validator: &CurrentValidator) -> Result<f64, EvalError> {
    let blocks = ratio(
        validator,
        Production::Blocks,
        validator.num_produced_blocks,
        validator.num_expected_blocks,
    )?;
    let chunks = ratio(
        validator,
        Production::Chunks,
        validator.num_produced_chunks,
        validator.num_expected_chunks,
    )?;

    Ok((blocks + chunks) / 2.0)
}

fn ratio(
    validator: &CurrentValidator,
    production: Production,
    produced: u64,
    expected: u64,
) -> Result<f64, EvalError> {
    if expected == 0 {
        return Err(EvalError::DivisionByZero {
            account_id: validator.account_id.clone(),
            production,
        });
    }
    Ok(produced as f64 / expected as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{NextValidator, RpcError};

    const POOL: &str = "lambda.factory.shardnet.near";

    fn current(account_id: &str, blocks: (u64, u64), chunks: (u64, u64)) -> CurrentValidator {
        CurrentValidator {
            account_id: account_id.to_string(),
            num_produced_blocks: blocks.0,
            num_expected_blocks: blocks.1,
            num_produced_chunks: chunks.0,
            num_expected_chunks: chunks.1,
            is_slashed: false,
        }
    }

    fn next(account_id: &str) -> NextValidator {
        NextValidator {
            account_id: account_id.to_string(),
        }
    }

    fn response(current: Vec<CurrentValidator>, next: Vec<NextValidator>) -> RpcOutcome<ValidatorsResponse> {
        RpcOutcome::Success(ValidatorsResponse {
            current_validators: current,
            next_validators: next,
            epoch_height: 120,
        })
    }

    fn status(outcome: RpcOutcome<ValidatorsResponse>) -> ValidatorStatus {
        match evaluate(outcome, POOL).unwrap() {
            Evaluation::Status(status) => status,
            other => panic!("expected a status, got {:?}", other),
        }
    }

    #[test]
    fn test_joined_validator() {
        let status = status(response(
            vec![
                current("other.factory.shardnet.near", (1, 1), (1, 1)),
                current(POOL, (95, 100), (198, 200)),
            ],
            vec![next(POOL)],
        ));

        assert!(status.joined);
        assert_eq!(status.expected_to_join_next, None);
        assert_eq!(status.produced_chunks, 198);
        assert!(!status.slashed);
        assert!((status.uptime_ratio.unwrap() - 0.97).abs() < 1e-9);
    }

    #[test]
    fn test_first_match_wins() {
        let mut slashed = current(POOL, (10, 10), (10, 10));
        slashed.is_slashed = true;

        let status = status(response(
            vec![slashed, current(POOL, (0, 10), (0, 10))],
            vec![],
        ));

        assert!(status.slashed);
        assert_eq!(status.uptime_ratio, Some(1.0));
    }

    #[test]
    fn test_substring_match() {
        let status = evaluate(
            response(vec![current(POOL, (5, 10), (10, 10))], vec![]),
            "lambda",
        )
        .unwrap();

        let Evaluation::Status(status) = status else {
            panic!("expected a status");
        };
        assert!(status.joined);
        assert_eq!(status.uptime_ratio, Some(0.75));
    }

    #[test]
    fn test_expected_to_join_next() {
        let status = status(response(
            vec![current("other.factory.shardnet.near", (1, 1), (1, 1))],
            vec![next("other.factory.shardnet.near"), next(POOL)],
        ));

        assert!(!status.joined);
        assert_eq!(status.expected_to_join_next, Some(true));
        assert_eq!(status.uptime_ratio, None);
    }

    #[test]
    fn test_not_in_any_set() {
        let status = status(response(vec![], vec![next("other.factory.shardnet.near")]));

        assert!(!status.joined);
        assert_eq!(status.expected_to_join_next, Some(false));
        assert_eq!(status.produced_chunks, 0);
    }

    #[test]
    fn test_uptime_bounds() {
        for (blocks, chunks) in [((0, 7), (0, 3)), ((7, 7), (3, 3)), ((3, 7), (1, 3)), ((95, 100), (192, 200))] {
            let ratio = uptime_ratio(&current(POOL, blocks, chunks)).unwrap();
            assert!((0.0..=1.0).contains(&ratio), "ratio {} out of bounds", ratio);
        }

        assert_eq!(uptime_ratio(&current(POOL, (42, 42), (9, 9))).unwrap(), 1.0);
        let ratio = uptime_ratio(&current(POOL, (95, 100), (192, 200))).unwrap();
        assert!((ratio - 0.955).abs() < 1e-9);
    }

    #[test]
    fn test_zero_expected_is_an_error() {
        assert_eq!(
            uptime_ratio(&current(POOL, (0, 0), (1, 2))).unwrap_err(),
            EvalError::DivisionByZero {
                account_id: POOL.to_string(),
                production: Production::Blocks,
            }
        );

        let err = evaluate(response(vec![current(POOL, (1, 2), (0, 0))], vec![]), POOL)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validator lambda.factory.shardnet.near has no expected chunks, uptime is undefined"
        );
    }

    #[test]
    fn test_error_object() {
        let error = RpcError {
            name: "HANDLER_ERROR".to_string(),
            cause: None,
            code: -32000,
            message: "Server error".to_string(),
        };

        let evaluation = evaluate(RpcOutcome::Failure(error), POOL).unwrap();
        assert!(matches!(evaluation, Evaluation::RpcError(_)));
    }
}
