use super::*;

/// How a metadata endpoint announces an upcoming termination
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeSignal {
    /// 200 means terminating, 404 means not yet, anything else is an error
    StatusCode,
    /// JSON scheduled events document containing a `Preempt` event
    ScheduledEvents,
    /// Plain text body that reads exactly `TRUE`
    PlainText,
}

impl NoticeSignal {
    pub const PLAIN_TEXT_TERMINATING: &'static str = "TRUE";

    /// Whether the verdict depends on the response body
    pub fn reads_body(self) -> bool {
        !matches!(self, Self::StatusCode)
    }

    /// Decide whether the instance is marked for termination
    ///
    /// `body` is ignored by [`NoticeSignal::StatusCode`].
    pub fn evaluate(self, status: u16, body: &str) -> Result<bool, SignalError> {
        match self {
            Self::StatusCode => match status {
                200 => Ok(true),
                404 => Ok(false),
                other => Err(SignalError::UnexpectedStatus(other)),
            },
            Self::ScheduledEvents => {
                let events = body.parse::<ScheduledEvents>()?;
                Ok(events.has_preemption())
            }
            Self::PlainText => Ok(body == Self::PLAIN_TEXT_TERMINATING),
        }
    }
}

/// Request template and response predicate for one provider's
/// termination notice endpoint, together with the wording recorded
/// on the node once the notice is observed.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeEndpoint {
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    pub signal: NoticeSignal,
    pub reason: String,
    pub message: String,
}

impl NoticeEndpoint {
    pub fn aws() -> Self {
        Self::new(AWS_TERMINATION_ENDPOINT, NoticeSignal::StatusCode)
    }

    pub fn azure() -> Self {
        Self::new(AZURE_TERMINATION_ENDPOINT, NoticeSignal::ScheduledEvents)
            .header("Metadata", "true")
    }

    pub fn gcp() -> Self {
        Self::new(GCP_TERMINATION_ENDPOINT, NoticeSignal::PlainText)
            .header("Metadata-Flavor", "Google")
    }

    pub fn for_provider(provider: Provider) -> Self {
        match provider {
            Provider::Aws => Self::aws(),
            Provider::Azure => Self::azure(),
            Provider::Gcp => Self::gcp(),
        }
    }

    fn new(url: impl ToString, signal: NoticeSignal) -> Self {
        Self {
            url: url.to_string(),
            headers: Vec::new(),
            signal,
            reason: TERMINATION_REQUESTED_REASON.to_string(),
            message: TERMINATION_REQUESTED_MESSAGE.to_string(),
        }
    }

    /// Point this endpoint somewhere else, keeping headers and signal
    ///
    pub fn url(self, url: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            ..self
        }
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn is_terminating(&self, status: u16, body: &str) -> Result<bool, SignalError> {
        self.signal.evaluate(status, body)
    }
}
