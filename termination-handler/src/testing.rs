use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use tokio::time::Instant;

use k8s::status;
use k8s::NodeExt as _;

use super::*;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct FakeApiError(&'static str);

/// What the next call to [`ScriptedProbe::probe`] does
#[derive(Clone, Copy, Debug)]
pub(crate) enum Step {
    Quiet,
    Terminating,
    Fail,
    Slow(Duration),
    Panic,
}

/// Probe replaying a fixed script, quiet once the script runs out
#[derive(Debug)]
pub(crate) struct ScriptedProbe {
    script: Mutex<VecDeque<Step>>,
    started: Mutex<Vec<Instant>>,
    completed: AtomicUsize,
}

impl ScriptedProbe {
    pub(crate) fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            started: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    pub(crate) fn quiet() -> Self {
        Self::new([])
    }

    pub(crate) fn started(&self) -> Vec<Instant> {
        self.started.lock().unwrap().clone()
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl Probe for ScriptedProbe {
    async fn probe(&self) -> Result<bool> {
        self.started.lock().unwrap().push(Instant::now());
        let step = self.script.lock().unwrap().pop_front().unwrap_or(Step::Quiet);
        let verdict = match step {
            Step::Quiet => Ok(false),
            Step::Terminating => Ok(true),
            Step::Fail => Err(Error::Protocol {
                url: "http://metadata.test/".to_string(),
                status: 500,
            }),
            Step::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(false)
            }
            Step::Panic => panic!("probe exploded"),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        verdict
    }
}

/// In-memory cluster holding a single node
#[derive(Debug, Default)]
pub(crate) struct FakeNodes {
    node: Mutex<Option<corev1::Node>>,
    gets: AtomicUsize,
    updates: Mutex<Vec<corev1::Node>>,
    fail_update: bool,
}

impl FakeNodes {
    pub(crate) fn with_conditions(
        name: &str,
        conditions: impl IntoIterator<Item = corev1::NodeCondition>,
    ) -> Self {
        let mut node = corev1::Node::new(name);
        node.conditions_mut().extend(conditions);
        Self {
            node: Mutex::new(Some(node)),
            ..Self::default()
        }
    }

    pub(crate) fn missing() -> Self {
        Self::default()
    }

    pub(crate) fn failing_update(self) -> Self {
        Self {
            fail_update: true,
            ..self
        }
    }

    pub(crate) fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub(crate) fn updates(&self) -> Vec<corev1::Node> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn conditions(&self) -> Vec<corev1::NodeCondition> {
        self.node
            .lock()
            .unwrap()
            .as_ref()
            .map(|node| node.conditions().to_vec())
            .unwrap_or_default()
    }
}

impl NodeStatusClient for FakeNodes {
    type Error = FakeApiError;

    async fn get_node(&self, name: &str) -> Result<corev1::Node, FakeApiError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.node
            .lock()
            .unwrap()
            .clone()
            .filter(|node| node.metadata.name.as_deref() == Some(name))
            .ok_or(FakeApiError("nodes not found"))
    }

    async fn replace_node_status(&self, node: &corev1::Node) -> Result<corev1::Node, FakeApiError> {
        if self.fail_update {
            return Err(FakeApiError("the object has been modified"));
        }
        self.updates.lock().unwrap().push(node.clone());
        *self.node.lock().unwrap() = Some(node.clone());
        Ok(node.clone())
    }
}

pub(crate) fn condition(type_: &str, status: &str) -> corev1::NodeCondition {
    corev1::NodeCondition {
        type_: type_.to_string(),
        status: status.to_string(),
        reason: Some(format!("{type_}Reason")),
        message: Some(format!("{type_} is {status}")),
        last_heartbeat_time: None,
        last_transition_time: None,
    }
}

pub(crate) fn ready() -> corev1::NodeCondition {
    condition("Ready", status::TRUE)
}

pub(crate) fn disk_pressure() -> corev1::NodeCondition {
    condition("DiskPressure", status::FALSE)
}
