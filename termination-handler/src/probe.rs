use super::*;

/// One request/response cycle against a termination notice endpoint
///
/// Implementations issue exactly one request per call and never retry.
pub trait Probe: Send + Sync {
    /// `Ok(true)` once the instance is marked for termination
    fn probe(&self) -> impl Future<Output = Result<bool>> + Send;
}

impl<P> Probe for std::sync::Arc<P>
where
    P: Probe,
{
    fn probe(&self) -> impl Future<Output = Result<bool>> + Send {
        (**self).probe()
    }
}

#[derive(Debug)]
pub struct HttpProbe {
    client: reqwest::Client,
    endpoint: NoticeEndpoint,
}

impl HttpProbe {
    /// Build a probe with its own HTTP client.
    ///
    /// Without `timeout` a request is only bounded by the transport itself.
    pub fn new(endpoint: NoticeEndpoint, timeout: Option<Duration>) -> Result<Self> {
        // metadata endpoints are link-local
        let builder = reqwest::Client::builder().no_proxy();
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let client = builder.build().map_err(Error::Client)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: NoticeEndpoint) -> Self {
        Self { client, endpoint }
    }
}

impl Probe for HttpProbe {
    async fn probe(&self) -> Result<bool> {
        let url = self.endpoint.url.as_str();
        let request = self
            .endpoint
            .headers
            .iter()
            .fold(self.client.get(url), |request, &(name, value)| {
                request.header(name, value)
            });

        let response = request
            .send()
            .await
            .map_err(|source| Error::network(url, source))?;
        let status = response.status().as_u16();

        let body = if self.endpoint.signal.reads_body() {
            response
                .text()
                .await
                .map_err(|source| Error::network(url, source))?
        } else {
            String::new()
        };

        let terminating = self
            .endpoint
            .is_terminating(status, &body)
            .map_err(|err| Error::signal(url, err))?;

        if !terminating {
            tracing::debug!(url, status, "Instance not marked for termination");
        }

        Ok(terminating)
    }
}
