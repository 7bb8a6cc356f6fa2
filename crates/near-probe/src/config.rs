use crate::keys::KeyPair;
use crate::retry::RetryPolicy;
use clap::Args;
use std::time::Duration;
use url::Url;

/// Probe options, read from flags or the environment
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Signer secret key (`ed25519:<base58>`)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Incoming-webhook URL alerts are posted to
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: Url,

    /// Account name of the validator operator, without network suffix
    #[arg(long, env = "ACCOUNT")]
    pub account: String,

    /// Reference block height; a genesis above it means a hard fork
    #[arg(long, env = "BLOCK_HEIGHT")]
    pub block_height: u64,

    /// NEAR network name
    #[arg(long, env = "NEAR_NETWORK", default_value = "shardnet")]
    pub network: String,

    /// RPC URL of the node (defaults to the public RPC of the network)
    #[arg(long, env = "NODE_URL")]
    pub node_url: Option<Url>,

    /// Staking pool to look up in the validator sets
    /// (defaults to `<account>.factory.<network>.near`)
    #[arg(long, env = "POOL_ID")]
    pub pool_id: Option<String>,

    /// Pretext shown above every alert
    #[arg(long, env = "BOT_NAME", default_value = "Lambda Bot")]
    pub bot_name: String,

    /// Footer icon URL attached to every alert
    #[arg(long, env = "FOOTER_ICON")]
    pub footer_icon: Option<String>,

    /// Deadline for a single RPC or webhook call, in seconds
    #[arg(long, env = "RPC_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Extra attempts for a failed RPC or webhook call
    #[arg(long, env = "RPC_RETRIES", default_value_t = 1)]
    pub retries: u32,
}

/// Validated probe configuration
#[derive(Debug)]
pub struct ProbeConfig {
    pub network: String,
    pub node_url: Url,
    pub webhook_url: Url,
    /// Account the key pair belongs to
    pub signer_id: String,
    pub key_pair: KeyPair,
    pub pool_id: String,
    pub block_height: u64,
    pub bot_name: String,
    pub footer_icon: Option<String>,
    pub retry: RetryPolicy,
}

impl ProbeConfig {
    pub fn from_args(args: ProbeArgs) -> eyre::Result<Self> {
        let key_pair: KeyPair = args
            .private_key
            .parse()
            .map_err(|e| eyre::eyre!("Invalid PRIVATE_KEY: {}", e))?;

        let account = args.account.trim();
        if account.is_empty() {
            return Err(eyre::eyre!("ACCOUNT must not be empty"));
        }

        let node_url = match args.node_url {
            Some(url) => url,
            None => format!("https://rpc.{}.near.org", args.network).parse()?,
        };

        let pool_id = args
            .pool_id
            .unwrap_or_else(|| format!("{}.factory.{}.near", account, args.network));

        Ok(Self {
            signer_id: format!("{}.{}.near", account, args.network),
            network: args.network,
            node_url,
            webhook_url: args.webhook_url,
            key_pair,
            pool_id,
            block_height: args.block_height,
            bot_name: args.bot_name,
            footer_icon: args.footer_icon,
            retry: RetryPolicy {
                timeout: Duration::from_secs(args.timeout_secs),
                retries: args.retries,
                ..RetryPolicy::default()
            },
        })
    }
}
