use super::*;

pub const TERMINATING_CONDITION_TYPE: &str = "Terminating";

pub trait NodeConditionExt {
    /// `Terminating=True` condition with both timestamps set to `now`
    fn terminating(reason: impl ToString, message: impl ToString, now: metav1::Time) -> Self;
    fn is_terminating(&self) -> bool;
    fn is_true(&self) -> bool;
}

impl NodeConditionExt for corev1::NodeCondition {
    fn terminating(reason: impl ToString, message: impl ToString, now: metav1::Time) -> Self {
        Self {
            type_: TERMINATING_CONDITION_TYPE.to_string(),
            status: status::TRUE.to_string(),
            reason: Some(reason.to_string()),
            message: Some(message.to_string()),
            last_heartbeat_time: Some(now.clone()),
            last_transition_time: Some(now),
        }
    }

    fn is_terminating(&self) -> bool {
        self.type_ == TERMINATING_CONDITION_TYPE
    }

    fn is_true(&self) -> bool {
        self.status == status::TRUE
    }
}
