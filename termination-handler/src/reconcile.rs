use termination_kubeapi::KubeApi;

use k8s::metav1;
use k8s::NodeConditionExt as _;
use k8s::NodeExt as _;
use k8s::TimeExt as _;

use super::*;

/// The slice of the cluster API the reconciler depends on
pub trait NodeStatusClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_node(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<corev1::Node, Self::Error>> + Send;

    fn replace_node_status(
        &self,
        node: &corev1::Node,
    ) -> impl Future<Output = Result<corev1::Node, Self::Error>> + Send;
}

impl NodeStatusClient for KubeApi {
    type Error = kube::Error;

    async fn get_node(&self, name: &str) -> kube::Result<corev1::Node> {
        Self::get_node(self, name).await
    }

    async fn replace_node_status(&self, node: &corev1::Node) -> kube::Result<corev1::Node> {
        Self::replace_node_status(self, node).await
    }
}

impl<C> NodeStatusClient for std::sync::Arc<C>
where
    C: NodeStatusClient,
{
    type Error = C::Error;

    fn get_node(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<corev1::Node, Self::Error>> + Send {
        (**self).get_node(name)
    }

    fn replace_node_status(
        &self,
        node: &corev1::Node,
    ) -> impl Future<Output = Result<corev1::Node, Self::Error>> + Send {
        (**self).replace_node_status(node)
    }
}

/// Merge `terminating` into `conditions`.
///
/// The first `Terminating` condition keeps its position. It is left untouched
/// when already `True` and replaced otherwise. Any later `Terminating`
/// duplicates are dropped. Without one, `terminating` is appended.
///
/// Returns whether `conditions` changed.
pub fn merge_termination_condition(
    conditions: &mut Vec<corev1::NodeCondition>,
    terminating: corev1::NodeCondition,
) -> bool {
    let Some(index) = conditions
        .iter()
        .position(|condition| condition.is_terminating())
    else {
        conditions.push(terminating);
        return true;
    };

    let mut changed = false;
    if !conditions[index].is_true() {
        conditions[index] = terminating;
        changed = true;
    }

    let before = conditions.len();
    let mut position = 0;
    conditions.retain(|condition| {
        let keep = position <= index || !condition.is_terminating();
        position += 1;
        keep
    });

    changed || conditions.len() != before
}

/// Fetch `node_name`, merge a `Terminating=True` condition carrying `reason`
/// and `message` into its status and write the status back.
///
/// One attempt only. A conflicting concurrent update surfaces as
/// [`Error::Update`].
pub async fn reconcile<C>(
    client: &C,
    node_name: &str,
    reason: &str,
    message: &str,
) -> Result<corev1::Node>
where
    C: NodeStatusClient,
{
    let mut node = client
        .get_node(node_name)
        .await
        .map_err(|source| Error::fetch(node_name, source))?;

    let terminating = corev1::NodeCondition::terminating(reason, message, metav1::Time::now());
    if !merge_termination_condition(node.conditions_mut(), terminating) {
        tracing::debug!(node = node_name, "Terminating condition already set");
    }

    let node = client
        .replace_node_status(&node)
        .await
        .map_err(|source| Error::update(node_name, source))?;
    tracing::info!(node = node_name, "Node marked as terminating");

    Ok(node)
}
