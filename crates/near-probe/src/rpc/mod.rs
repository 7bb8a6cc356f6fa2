use crate::retry::{RetryPolicy, with_retry};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

mod types;

pub use types::*;

/// Read-only queries the probe issues against a NEAR node
#[async_trait]
pub trait NearRpc: Send + Sync {
    async fn status(&self) -> eyre::Result<RpcOutcome<StatusResponse>>;

    async fn validators(
        &self,
        epoch: EpochReference,
    ) -> eyre::Result<RpcOutcome<ValidatorsResponse>>;

    async fn protocol_config(
        &self,
        checkpoint: SyncCheckpoint,
    ) -> eyre::Result<RpcOutcome<ProtocolConfigResponse>>;
}

/// JSON-RPC 2.0 client over HTTP
pub struct JsonRpcClient {
    rpc_url: Url,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl JsonRpcClient {
    pub fn new(rpc_url: Url, retry: RetryPolicy) -> Self {
        Self {
            rpc_url,
            client: reqwest::Client::new(),
            retry,
        }
    }

    async fn rpc_call<T>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> eyre::Result<RpcOutcome<T>>
    where
        T: DeserializeOwned + Send,
    {
        tracing::debug!("Calling {} on {}", method, self.rpc_url);
        with_retry(&self.retry, method, move || self.send(method, params.clone())).await
    }

    async fn send<T>(&self, method: &str, params: serde_json::Value) -> eyre::Result<RpcOutcome<T>>
    where
        T: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(self.rpc_url.clone())
            .json(&json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": "dontcare"
            }))
            .send()
            .await?;

        let envelope: Envelope<T> = response.json().await?;
        envelope.into_outcome()
    }
}

#[async_trait]
impl NearRpc for JsonRpcClient {
    async fn status(&self) -> eyre::Result<RpcOutcome<StatusResponse>> {
        self.rpc_call("status", json!([])).await
    }

    async fn validators(
        &self,
        epoch: EpochReference,
    ) -> eyre::Result<RpcOutcome<ValidatorsResponse>> {
        let params = match epoch {
            EpochReference::Latest => json!([null]),
            EpochReference::EpochId(id) => json!([id]),
        };
        self.rpc_call("validators", params).await
    }

    async fn protocol_config(
        &self,
        checkpoint: SyncCheckpoint,
    ) -> eyre::Result<RpcOutcome<ProtocolConfigResponse>> {
        self.rpc_call(
            "EXPERIMENTAL_protocol_config",
            json!({ "sync_checkpoint": checkpoint }),
        )
        .await
    }
}
