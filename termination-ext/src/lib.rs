pub use k8s_openapi as openapi;
pub use k8s_openapi::api::core::v1 as corev1;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;

pub use condition::NodeConditionExt;
pub use condition::TERMINATING_CONDITION_TYPE;
pub use node::NodeExt;
pub use time::TimeExt;

mod condition;
mod node;
mod time;

pub trait ObjectMetaExt {
    fn new(name: impl ToString) -> Self;
}

impl ObjectMetaExt for metav1::ObjectMeta {
    fn new(name: impl ToString) -> Self {
        let name = Some(name.to_string());
        Self { name, ..default() }
    }
}

/// Status values a condition may carry
pub mod status {
    pub const TRUE: &str = "True";
    pub const FALSE: &str = "False";
    pub const UNKNOWN: &str = "Unknown";
}

pub fn default<T: Default>() -> T {
    T::default()
}
