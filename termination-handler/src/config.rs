use super::*;

/// Everything one handler instance needs to know, fixed for its lifetime
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerConfig {
    pub provider: Provider,
    pub poll_interval: Duration,
    pub node_name: String,
    /// Only attached to log records; node lookups are cluster scoped
    pub namespace: Option<String>,
    /// Transport timeout for each metadata request, none by default
    pub request_timeout: Option<Duration>,
    /// Replaces the provider's metadata URL, keeping its headers and signal
    pub endpoint_url: Option<String>,
}

impl HandlerConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(provider: Provider, node_name: impl ToString) -> Self {
        Self {
            provider,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            node_name: node_name.to_string(),
            namespace: None,
            request_timeout: None,
            endpoint_url: None,
        }
    }

    /// Select the provider by its name (`aws`, `azure` or `gcp`)
    ///
    pub fn from_provider_name(provider: &str, node_name: impl ToString) -> Result<Self> {
        let provider = provider.parse()?;
        Ok(Self::new(provider, node_name))
    }

    pub fn poll_interval(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }

    pub fn namespace(self, namespace: impl Into<Option<String>>) -> Self {
        Self {
            namespace: namespace.into().filter(|namespace| !namespace.is_empty()),
            ..self
        }
    }

    pub fn request_timeout(self, request_timeout: impl Into<Option<Duration>>) -> Self {
        Self {
            request_timeout: request_timeout.into(),
            ..self
        }
    }

    pub fn endpoint_url(self, url: impl ToString) -> Self {
        Self {
            endpoint_url: Some(url.to_string()),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_name.is_empty() {
            return Err(Error::Configuration("node name is not specified"));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::Configuration("poll interval must be positive"));
        }
        Ok(())
    }

    /// The provider's notice endpoint with `endpoint_url` applied
    ///
    pub fn endpoint(&self) -> NoticeEndpoint {
        let endpoint = self.provider.endpoint();
        match &self.endpoint_url {
            Some(url) => endpoint.url(url),
            None => endpoint,
        }
    }
}
