use thiserror::Error;

use super::*;

pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid handler configuration: {0}")]
    Provider(#[from] notice::ProviderError),

    #[error("invalid handler configuration: {0}")]
    Configuration(&'static str),

    #[error("error creating HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not get URL {url:?}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("error polling termination endpoint {url:?}: unexpected status: {status}")]
    Protocol { url: String, status: u16 },

    #[error("error polling termination endpoint {url:?}: failed to unmarshal response body: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error fetching node {node:?}: {source}")]
    Fetch {
        node: String,
        #[source]
        source: BoxError,
    },

    #[error("error updating node {node:?} status: {source}")]
    Update {
        node: String,
        #[source]
        source: BoxError,
    },

    #[error("termination handler task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Error category, independent of the context each error carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Protocol,
    Parse,
    Fetch,
    Update,
    Task,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(_) | Self::Configuration(_) | Self::Client(_) => {
                ErrorKind::Configuration
            }
            Self::Network { .. } => ErrorKind::Network,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Update { .. } => ErrorKind::Update,
            Self::Task(_) => ErrorKind::Task,
        }
    }

    pub(crate) fn network(url: impl ToString, source: reqwest::Error) -> Self {
        let url = url.to_string();
        Self::Network { url, source }
    }

    pub(crate) fn signal(url: impl ToString, err: notice::SignalError) -> Self {
        let url = url.to_string();
        match err {
            notice::SignalError::UnexpectedStatus(status) => Self::Protocol { url, status },
            notice::SignalError::Parse(source) => Self::Parse { url, source },
        }
    }

    pub(crate) fn fetch(node: impl ToString, source: impl Into<BoxError>) -> Self {
        let node = node.to_string();
        let source = source.into();
        Self::Fetch { node, source }
    }

    pub(crate) fn update(node: impl ToString, source: impl Into<BoxError>) -> Self {
        let node = node.to_string();
        let source = source.into();
        Self::Update { node, source }
    }
}
