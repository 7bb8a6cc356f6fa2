//! Rendering of evaluations into Slack-style webhook attachments.

use crate::evaluate::{ErrorReport, Evaluation, GenesisStatus, NodeStatus, ValidatorStatus};
use serde::Serialize;

pub const COLOR_GOOD: &str = "#2eb886";
pub const COLOR_WARNING: &str = "#daa038";
pub const COLOR_DANGER: &str = "#a30200";

/// Body of a single webhook POST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
}

/// Uptime ratio as a percentage with two decimals
pub fn format_uptime(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

pub struct AlertRenderer {
    bot_name: String,
    footer_icon: Option<String>,
}

impl AlertRenderer {
    pub fn new(bot_name: String, footer_icon: Option<String>) -> Self {
        Self {
            bot_name,
            footer_icon,
        }
    }

    pub fn node(&self, evaluation: &Evaluation<NodeStatus>) -> Alert {
        const TITLE: &str = "Node Status";

        let attachments = match evaluation {
            Evaluation::Status(node) => {
                let color = if node.protocol_version_gap {
                    COLOR_WARNING
                } else {
                    COLOR_GOOD
                };
                vec![
                    self.attachment(
                        TITLE,
                        color,
                        format!(
                            "Protocol version gap: {} (node {}, network {})",
                            node.protocol_version_gap,
                            node.protocol_version,
                            node.latest_protocol_version
                        ),
                    ),
                    self.attachment(
                        TITLE,
                        COLOR_GOOD,
                        format!(
                            "Latest block: #{} at {} (syncing: {})",
                            node.latest_block_height, node.latest_block_time, node.syncing
                        ),
                    ),
                ]
            }
            Evaluation::RpcError(report) => vec![self.rpc_error(TITLE, report)],
        };

        Alert { attachments }
    }

    pub fn validator(&self, evaluation: &Evaluation<ValidatorStatus>) -> Alert {
        const TITLE: &str = "Validator Status";

        let status = match evaluation {
            Evaluation::Status(status) => status,
            Evaluation::RpcError(report) => {
                return Alert {
                    attachments: vec![self.rpc_error(TITLE, report)],
                };
            }
        };

        let uptime = status
            .uptime_ratio
            .map(format_uptime)
            .unwrap_or_else(|| "N/A".to_string());
        let color = if status.joined { COLOR_GOOD } else { COLOR_WARNING };

        let mut attachments = vec![
            self.attachment(
                TITLE,
                color,
                format!(
                    "Joined: {}, Produced chunks: {}, Uptime: {}",
                    status.joined, status.produced_chunks, uptime
                ),
            ),
            self.attachment(
                TITLE,
                if status.slashed { COLOR_DANGER } else { COLOR_GOOD },
                format!("Slashed: {}", status.slashed),
            ),
        ];

        if let Some(expected) = status.expected_to_join_next {
            attachments.push(self.attachment(
                TITLE,
                if expected { COLOR_GOOD } else { COLOR_DANGER },
                format!("Expected to join next epoch: {}", expected),
            ));
        }

        Alert { attachments }
    }

    pub fn genesis(&self, evaluation: &Evaluation<GenesisStatus>) -> Alert {
        const TITLE: &str = "Genesis Status";

        let attachments = match evaluation {
            Evaluation::Status(genesis) => {
                let mut attachments = vec![self.attachment(
                    TITLE,
                    COLOR_GOOD,
                    format!(
                        "Genesis time: {}, Genesis height: {}",
                        genesis.genesis_time, genesis.genesis_height
                    ),
                )];
                if genesis.hardfork_required {
                    attachments.push(self.attachment(
                        TITLE,
                        COLOR_DANGER,
                        format!(
                            "Hard fork required: genesis height {} is above the reference block height",
                            genesis.genesis_height
                        ),
                    ));
                }
                attachments
            }
            Evaluation::RpcError(report) => vec![self.rpc_error(TITLE, report)],
        };

        Alert { attachments }
    }

    fn rpc_error(&self, title: &str, report: &ErrorReport) -> Attachment {
        self.attachment(
            title,
            COLOR_DANGER,
            format!(
                "{} Error ({}): {}",
                report.error_name, report.error_cause_name, report.error_info
            ),
        )
    }

    fn attachment(&self, title: &str, color: &str, text: String) -> Attachment {
        Attachment {
            fallback: format!("{}: {}", title, text),
            color: color.to_string(),
            pretext: Some(self.bot_name.clone()),
            title: Some(title.to_string()),
            text,
            footer_icon: self.footer_icon.clone(),
        }
    }
}
