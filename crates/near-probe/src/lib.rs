pub mod alert;
pub mod config;
pub mod evaluate;
pub mod keys;
pub mod probe;
pub mod retry;
pub mod rpc;
pub mod server;
pub mod webhook;

pub use alert::{Alert, AlertRenderer, Attachment};
pub use config::{ProbeArgs, ProbeConfig};
pub use evaluate::{ErrorReport, EvalError, Evaluation};
pub use probe::{Invocation, Probe};
pub use rpc::{JsonRpcClient, NearRpc, RpcOutcome};
pub use server::ProbeServer;
pub use webhook::{Notifier, WebhookNotifier};
