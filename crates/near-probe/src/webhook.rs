use crate::alert::Alert;
use crate::retry::{RetryPolicy, with_retry};
use async_trait::async_trait;
use url::Url;

/// Delivery of rendered alerts
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &Alert) -> eyre::Result<()>;
}

/// Posts alerts to an incoming-webhook URL
pub struct WebhookNotifier {
    webhook_url: Url,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl WebhookNotifier {
    pub fn new(webhook_url: Url, retry: RetryPolicy) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
            retry,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, alert: &Alert) -> eyre::Result<()> {
        with_retry(&self.retry, "webhook", move || async move {
            self.client
                .post(self.webhook_url.clone())
                .json(alert)
                .send()
                .await?
                .error_for_status()?;
            Ok::<_, eyre::Report>(())
        })
        .await
    }
}
