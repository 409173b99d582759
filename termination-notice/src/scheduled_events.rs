use serde::Deserializer;

use super::*;

/// Azure scheduled events document, see
/// https://docs.microsoft.com/en-us/azure/virtual-machines/linux/scheduled-events#use-the-api
///
/// Only the event types take part in the verdict, every other field of the
/// document is ignored whatever its shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduledEvents {
    #[serde(deserialize_with = "null_as_empty")]
    pub events: Vec<ScheduledEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduledEvent {
    /// one of Freeze, Reboot, Redeploy, Preempt or Terminate
    ///
    pub event_type: Option<String>,
}

impl ScheduledEvents {
    pub fn has_preemption(&self) -> bool {
        self.events.iter().any(ScheduledEvent::is_preemption)
    }
}

impl ScheduledEvent {
    pub const PREEMPT: &'static str = "Preempt";

    pub fn is_preemption(&self) -> bool {
        self.event_type.as_deref() == Some(Self::PREEMPT)
    }
}

impl FromStr for ScheduledEvents {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ScheduledEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Option::unwrap_or_default)
}
