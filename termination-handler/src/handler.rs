use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::Instrument as _;

use super::*;

/// Where a single handler run currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerState {
    Polling,
    Detected,
    Reconciling,
    Done,
    Failed,
    Cancelled,
}

impl HandlerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }
}

/// Watches the termination notice endpoint of one node and marks the node
/// `Terminating` once the cloud provider announces its reclaim.
///
#[derive(Debug)]
pub struct Handler<C, P = HttpProbe> {
    config: HandlerConfig,
    client: C,
    probe: P,
    state: watch::Sender<HandlerState>,
}

impl<C> Handler<C>
where
    C: NodeStatusClient + 'static,
{
    /// Handler probing the configured provider's endpoint over HTTP
    ///
    pub fn new(config: HandlerConfig, client: C) -> Result<Self> {
        let probe = HttpProbe::new(config.endpoint(), config.request_timeout)?;
        Self::with_probe(config, client, probe)
    }
}

impl<C, P> Handler<C, P>
where
    C: NodeStatusClient + 'static,
    P: Probe + 'static,
{
    pub fn with_probe(config: HandlerConfig, client: C, probe: P) -> Result<Self> {
        config.validate()?;
        let (state, _) = watch::channel(HandlerState::Polling);
        Ok(Self {
            config,
            client,
            probe,
            state,
        })
    }

    /// Observe state transitions, the last one stays readable after `run` returns
    ///
    pub fn subscribe(&self) -> watch::Receiver<HandlerState> {
        self.state.subscribe()
    }

    /// Run until the node is marked terminating, an error occurs or `stop` resolves.
    ///
    /// Polling and reconciliation run on their own task. When `stop` wins the
    /// race the task is cancelled and joined before `Ok(())` is returned, so
    /// nothing is left running. Otherwise the task's own result is returned.
    /// Dropping the returned future cancels the task as well.
    pub async fn run(self, stop: impl Future<Output = ()>) -> Result<()> {
        let span = tracing::info_span!(
            "termination_handler",
            node = %self.config.node_name,
            namespace = self.config.namespace.as_deref().unwrap_or_default(),
            provider = %self.config.provider,
        );
        let token = CancellationToken::new();
        let mut task = tokio::spawn(self.watch(token.clone()).instrument(span));
        // cancels the task when `run` is dropped before it finishes
        let _cancel_on_drop = token.clone().drop_guard();

        tokio::select! {
            () = stop => {
                tracing::info!("Stop requested, waiting for termination handler to finish");
                token.cancel();
                match task.await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => tracing::warn!(%err, "Termination handler failed while stopping"),
                    Err(err) => tracing::warn!(%err, "Termination handler task failed while stopping"),
                }
                Ok(())
            }
            joined = &mut task => {
                token.cancel();
                joined?
            }
        }
    }

    async fn watch(self, token: CancellationToken) -> Result<()> {
        let result = self.watch_inner(&token).await;
        if result.is_err() {
            self.transition(HandlerState::Failed);
        }
        result
    }

    async fn watch_inner(&self, token: &CancellationToken) -> Result<()> {
        let endpoint = self.config.endpoint();
        tracing::info!(url = %endpoint.url, interval = ?self.config.poll_interval, "Monitoring node termination");
        self.transition(HandlerState::Polling);

        let outcome =
            poll_until_terminating(&self.probe, self.config.poll_interval, token).await?;
        if outcome == PollOutcome::Cancelled {
            self.transition(HandlerState::Cancelled);
            return Ok(());
        }

        self.transition(HandlerState::Detected);
        tracing::info!("Instance marked for termination, marking node");

        self.transition(HandlerState::Reconciling);
        reconcile(
            &self.client,
            &self.config.node_name,
            &endpoint.reason,
            &endpoint.message,
        )
        .await?;

        self.transition(HandlerState::Done);
        Ok(())
    }

    fn transition(&self, state: HandlerState) {
        let previous = self.state.send_replace(state);
        if previous == state {
            return;
        }
        if state.is_terminal() {
            tracing::info!(?state, "Termination handler finished");
        } else {
            tracing::debug!(?previous, ?state, "Handler state changed");
        }
    }
}
