use std::future::Future;
use std::time::Duration;

use termination_ext as k8s;
use termination_notice as notice;

use k8s::corev1;

pub use config::HandlerConfig;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
pub use handler::Handler;
pub use handler::HandlerState;
pub use notice::NoticeEndpoint;
pub use notice::Provider;
pub use poll::poll_until_terminating;
pub use poll::PollOutcome;
pub use probe::HttpProbe;
pub use probe::Probe;
pub use reconcile::merge_termination_condition;
pub use reconcile::reconcile;
pub use reconcile::NodeStatusClient;

mod config;
mod error;
mod handler;
mod poll;
mod probe;
mod reconcile;

#[cfg(test)]
mod testing;
