use crate::alert::{Alert, AlertRenderer};
use crate::config::ProbeConfig;
use crate::evaluate::{self, Evaluation, GenesisStatus, NodeStatus, ValidatorStatus};
use crate::rpc::{EpochReference, JsonRpcClient, NearRpc, SyncCheckpoint};
use crate::webhook::{Notifier, WebhookNotifier};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Node,
    Validator,
    Genesis,
}

impl Check {
    pub const ALL: [Check; 3] = [Check::Node, Check::Validator, Check::Genesis];
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Node => write!(f, "node"),
            Check::Validator => write!(f, "validator"),
            Check::Genesis => write!(f, "genesis"),
        }
    }
}

/// All three evaluations of a single run
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub node: Evaluation<NodeStatus>,
    pub validator: Evaluation<ValidatorStatus>,
    pub genesis: Evaluation<GenesisStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckFailure {
    pub check: Check,
    pub error: String,
}

/// Outcome of a run; failed checks do not stop the ones after them
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeReport {
    pub failures: Vec<CheckFailure>,
}

impl ProbeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationBody {
    pub message: String,
}

/// Result handed back to whatever triggered the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub status_code: u16,
    pub body: InvocationBody,
}

impl Invocation {
    pub fn body_json(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.message.clone())
    }
}

impl From<ProbeReport> for Invocation {
    fn from(report: ProbeReport) -> Self {
        if report.is_success() {
            return Self {
                status_code: 200,
                body: InvocationBody {
                    message: "Probe run complete".to_string(),
                },
            };
        }

        let message = report
            .failures
            .iter()
            .map(|failure| format!("{} check failed: {}", failure.check, failure.error))
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            status_code: 500,
            body: InvocationBody { message },
        }
    }
}

/// Fetches, evaluates and reports the status of one validator
pub struct Probe {
    rpc: Arc<dyn NearRpc>,
    notifier: Arc<dyn Notifier>,
    renderer: AlertRenderer,
    pool_id: String,
    block_height: u64,
}

impl Probe {
    pub fn new(
        rpc: impl NearRpc + 'static,
        notifier: impl Notifier + 'static,
        renderer: AlertRenderer,
        pool_id: String,
        block_height: u64,
    ) -> Self {
        Self {
            rpc: Arc::new(rpc),
            notifier: Arc::new(notifier),
            renderer,
            pool_id,
            block_height,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            JsonRpcClient::new(config.node_url.clone(), config.retry),
            WebhookNotifier::new(config.webhook_url.clone(), config.retry),
            AlertRenderer::new(config.bot_name.clone(), config.footer_icon.clone()),
            config.pool_id.clone(),
            config.block_height,
        )
    }

    pub async fn node_status(&self) -> eyre::Result<Evaluation<NodeStatus>> {
        let outcome = self.rpc.status().await?;
        Ok(evaluate::node::evaluate(outcome))
    }

    pub async fn validator_status(&self) -> eyre::Result<Evaluation<ValidatorStatus>> {
        let outcome = self.rpc.validators(EpochReference::Latest).await?;
        Ok(evaluate::validator::evaluate(outcome, &self.pool_id)?)
    }

    pub async fn genesis_status(&self) -> eyre::Result<Evaluation<GenesisStatus>> {
        let outcome = self.rpc.protocol_config(SyncCheckpoint::Genesis).await?;
        Ok(evaluate::genesis::evaluate(outcome, self.block_height)?)
    }

    /// Evaluates every check without sending alerts
    pub async fn snapshot(&self) -> eyre::Result<Snapshot> {
        Ok(Snapshot {
            node: self.node_status().await?,
            validator: self.validator_status().await?,
            genesis: self.genesis_status().await?,
        })
    }

    async fn alert_for(&self, check: Check) -> eyre::Result<Alert> {
        let alert = match check {
            Check::Node => self.renderer.node(&self.node_status().await?),
            Check::Validator => self.renderer.validator(&self.validator_status().await?),
            Check::Genesis => self.renderer.genesis(&self.genesis_status().await?),
        };
        Ok(alert)
    }

    pub async fn run_check(&self, check: Check) -> eyre::Result<()> {
        let alert = self.alert_for(check).await?;
        self.notifier.notify(&alert).await?;
        tracing::info!(%check, attachments = alert.attachments.len(), "Alert sent");
        Ok(())
    }

    /// Runs every check in order
    pub async fn run(&self) -> ProbeReport {
        let mut report = ProbeReport::default();

        for check in Check::ALL {
            if let Err(err) = self.run_check(check).await {
                tracing::error!(%check, "Check failed: {:#}", err);
                report.failures.push(CheckFailure {
                    check,
                    error: format!("{:#}", err),
                });
            }
        }

        report
    }

    pub async fn invoke(&self) -> Invocation {
        tracing::info!("Starting probe run for {}", self.pool_id);
        let invocation = Invocation::from(self.run().await);
        tracing::info!(status_code = invocation.status_code, "Probe run finished");
        invocation
    }
}
