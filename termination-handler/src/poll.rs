use tokio::time::interval;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Terminating,
    Cancelled,
}

/// Probe every `period` until the instance is marked for termination.
///
/// The first probe fires immediately and later ones are spaced by `period`
/// measured from the start of the previous tick. `token` is only consulted
/// while waiting for the next tick, so a probe already in flight always
/// completes. Any probe error ends polling. A zero `period` is rejected
/// before the first probe.
pub async fn poll_until_terminating<P>(
    probe: &P,
    period: Duration,
    token: &CancellationToken,
) -> Result<PollOutcome>
where
    P: Probe,
{
    if period.is_zero() {
        return Err(Error::Configuration("poll interval must be positive"));
    }

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        if probe.probe().await? {
            return Ok(PollOutcome::Terminating);
        }

        tokio::select! {
            biased;
            () = token.cancelled() => return Ok(PollOutcome::Cancelled),
            _ = ticker.tick() => {}
        }
    }
}

#[cfg(test)]
mod tests;
