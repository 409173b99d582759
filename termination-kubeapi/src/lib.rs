use std::fmt::Debug;

use kube::api;
use termination_ext as k8s;

use k8s::corev1;

pub struct KubeApi {
    get_params: api::GetParams,
    post_params: api::PostParams,
    client: kube::Client,
}

impl KubeApi {
    /// Create a KubeApi configured with a default Kubernetes client.
    ///
    /// The client is inferred from the environment: in-cluster service account
    /// credentials when running inside a pod, the local kubeconfig otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), kube::Error> {
    /// let api = termination_kubeapi::KubeApi::new().await?;
    /// // use `api`...
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new() -> kube::Result<Self> {
        kube::Client::try_default().await.map(Self::with_client)
    }

    /// Create a KubeApi backed by the provided Kubernetes client.
    ///
    /// The returned KubeApi is initialized with default `GetParams` and `PostParams`
    /// and uses `client` for all Kubernetes interactions.
    pub fn with_client(client: kube::Client) -> Self {
        Self {
            get_params: api::GetParams::default(),
            post_params: api::PostParams::default(),
            client,
        }
    }

    /// Fetches the Node called `name`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use termination_kubeapi::KubeApi;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let api = KubeApi::new().await?;
    /// let node = api.get_node("node-1").await?;
    /// println!("{:?}", node.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_node(&self, name: &str) -> kube::Result<corev1::Node> {
        tracing::trace!(name, "Fetching node");
        let gp = self.get_params();
        self.nodes().get_with(name, gp).await
    }

    /// Replaces the `status` subresource of `node` with the status it carries.
    ///
    /// The write carries the node's `resourceVersion`, so a concurrent change
    /// made since `node` was fetched is rejected by the API server with a conflict
    /// instead of being overwritten.
    ///
    /// # Returns
    ///
    /// The Node as stored by the API server after the update.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use termination_kubeapi::KubeApi;
    /// # async fn example() -> kube::Result<()> {
    /// let api = KubeApi::new().await?;
    /// let node = api.get_node("node-1").await?;
    /// let node = api.replace_node_status(&node).await?;
    /// println!("{:?}", node.metadata.resource_version);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn replace_node_status(&self, node: &corev1::Node) -> kube::Result<corev1::Node> {
        let name = node.metadata.name.as_deref().unwrap_or_default();
        tracing::trace!(name, "Replacing node status");
        let pp = self.post_params();
        self.nodes().replace_status(name, pp, node).await
    }

    /// Returns an Api handle scoped to all Nodes using the configured Kubernetes client.
    fn nodes(&self) -> api::Api<corev1::Node> {
        api::Api::all(self.client.clone())
    }

    fn get_params(&self) -> &api::GetParams {
        &self.get_params
    }

    fn post_params(&self) -> &api::PostParams {
        &self.post_params
    }
}

impl Debug for KubeApi {
    /// Formats the `KubeApi` for debugging, showing `get_params` and `post_params` while redacting the `client`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeApi")
            .field("get_params", &self.get_params)
            .field("post_params", &self.post_params)
            .field("client", &"<kube::Client>")
            .finish()
    }
}
