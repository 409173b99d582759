use std::fmt;
use std::str::FromStr;

use constcat::concat;
use serde::Deserialize;
use thiserror::Error;

pub use endpoint::NoticeEndpoint;
pub use endpoint::NoticeSignal;
pub use provider::Provider;
pub use scheduled_events::ScheduledEvent;
pub use scheduled_events::ScheduledEvents;

/// Link-local address every supported cloud serves its instance metadata on
pub const METADATA_HOST: &str = "http://169.254.169.254";

pub const AWS_TERMINATION_ENDPOINT: &str =
    concat!(METADATA_HOST, "/latest/meta-data/spot/termination-time");

/// See https://docs.microsoft.com/en-us/azure/virtual-machines/linux/scheduled-events#endpoint-discovery
pub const AZURE_SCHEDULED_EVENTS_API_VERSION: &str = "2019-08-01";
pub const AZURE_TERMINATION_ENDPOINT: &str = concat!(
    METADATA_HOST,
    "/metadata/scheduledevents?api-version=",
    AZURE_SCHEDULED_EVENTS_API_VERSION
);

pub const GCP_TERMINATION_ENDPOINT: &str =
    concat!(METADATA_HOST, "/computeMetadata/v1/instance/preempted");

pub const TERMINATION_REQUESTED_REASON: &str = "TerminationRequested";
pub const TERMINATION_REQUESTED_MESSAGE: &str =
    "The cloud provider has marked this instance for termination";

mod endpoint;
mod provider;
mod scheduled_events;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("cloud provider is not specified")]
    Unspecified,
    #[error("cloud provider {0:?} is not supported")]
    Unsupported(String),
}

/// Reasons a metadata response could not be turned into a verdict
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("unexpected status: {0}")]
    UnexpectedStatus(u16),
    #[error("failed to unmarshal response body: {0}")]
    Parse(#[from] serde_json::Error),
}
