use super::*;

/// Marks this node `Terminating` as soon as the cloud provider announces its reclaim
#[derive(Debug, Parser)]
#[command(name = "termination-handler", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Interval in seconds at which the termination notice endpoint is checked
    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value_t = 5)]
    poll_interval_seconds: u64,

    /// Name of the node the termination handler is running on
    #[arg(long, env = "NODE_NAME")]
    node_name: String,

    /// Namespace the machine for the node lives in
    #[arg(long, env = "NAMESPACE")]
    namespace: Option<String>,

    /// Cloud provider the termination handler is running on (aws, azure or gcp)
    #[arg(long, env = "CLOUD_PROVIDER", default_value = "")]
    cloud_provider: String,

    /// Timeout in seconds for each termination notice request
    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS")]
    request_timeout_seconds: Option<u64>,
}

impl Cli {
    pub(crate) fn handler_config(&self) -> termination_handler::Result<HandlerConfig> {
        let config = HandlerConfig::from_provider_name(&self.cloud_provider, &self.node_name)?
            .poll_interval(seconds(self.poll_interval_seconds))
            .namespace(self.namespace.clone())
            .request_timeout(self.request_timeout_seconds.map(seconds));
        Ok(config)
    }
}
