use time::ext::NumericalStdDuration as _;
use tokio::time::Instant;

use crate::testing::ScriptedProbe;
use crate::testing::Step;

use super::*;

fn offsets(probe: &ScriptedProbe, start: Instant) -> Vec<u64> {
    probe
        .started()
        .into_iter()
        .map(|at| (at - start).as_secs())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn probes_immediately_then_every_interval() {
    let probe = ScriptedProbe::new([Step::Quiet, Step::Quiet, Step::Quiet, Step::Terminating]);
    let token = CancellationToken::new();
    let start = Instant::now();

    let outcome = poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Terminating);
    assert_eq!(offsets(&probe, start), [0, 5, 10, 15]);
}

#[tokio::test(start_paused = true)]
async fn first_probe_terminating() {
    let probe = ScriptedProbe::new([Step::Terminating]);
    let token = CancellationToken::new();

    let outcome = poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Terminating);
    assert_eq!(probe.started().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn probe_error_stops_polling() {
    let probe = ScriptedProbe::new([Step::Quiet, Step::Fail, Step::Terminating]);
    let token = CancellationToken::new();

    let err = poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(probe.started().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_wait() {
    let probe = ScriptedProbe::quiet();
    let token = CancellationToken::new();
    let start = Instant::now();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(12.std_seconds()).await;
        canceller.cancel();
    });

    let outcome = poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled);
    assert_eq!(offsets(&probe, start), [0, 5, 10]);
}

#[tokio::test(start_paused = true)]
async fn in_flight_probe_completes_before_cancellation() {
    let probe = ScriptedProbe::new([Step::Slow(3.std_seconds()), Step::Terminating]);
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(1.std_seconds()).await;
        canceller.cancel();
    });

    let outcome = poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled);
    assert_eq!(probe.started().len(), 1);
    assert_eq!(probe.completed(), 1);
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_still_probes_once() {
    let probe = ScriptedProbe::quiet();
    let token = CancellationToken::new();
    token.cancel();

    let outcome = poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled);
    assert_eq!(probe.started().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_probe_delays_next_tick() {
    let probe = ScriptedProbe::new([Step::Slow(7.std_seconds()), Step::Terminating]);
    let token = CancellationToken::new();
    let start = Instant::now();

    poll_until_terminating(&probe, 5.std_seconds(), &token)
        .await
        .unwrap();

    assert_eq!(offsets(&probe, start), [0, 7]);
}

#[tokio::test(start_paused = true)]
async fn zero_period_is_configuration_error() {
    let probe = ScriptedProbe::new([Step::Terminating]);
    let token = CancellationToken::new();

    let err = poll_until_terminating(&probe, Duration::ZERO, &token)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(probe.started().is_empty());
}
