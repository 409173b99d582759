use super::*;

pub trait NodeExt {
    fn new(name: impl ToString) -> Self;
    fn conditions(&self) -> &[corev1::NodeCondition];
    /// Mutable access to the condition list, creating the status on demand
    fn conditions_mut(&mut self) -> &mut Vec<corev1::NodeCondition>;
}

impl NodeExt for corev1::Node {
    fn new(name: impl ToString) -> Self {
        Self {
            metadata: metav1::ObjectMeta::new(name),
            ..default()
        }
    }

    fn conditions(&self) -> &[corev1::NodeCondition] {
        self.status
            .as_ref()
            .and_then(|status| status.conditions.as_deref())
            .unwrap_or_default()
    }

    fn conditions_mut(&mut self) -> &mut Vec<corev1::NodeCondition> {
        self.status
            .get_or_insert_with(default)
            .conditions
            .get_or_insert_with(Vec::new)
    }
}
