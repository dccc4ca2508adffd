//! Intermediate process model built from the text analysis: ordered tasks and
//! decisions, the discovered participants, the pools/lanes they are grouped
//! into and the synthesized message flows between pools.

pub(crate) mod pools;

use crate::analyze::{self, LineKind};
use log::debug;
use std::fmt::Display;

/// Flow node element name for a task, per BPMN 2.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskType {
    #[default]
    User,
    Send,
    Receive,
    Service,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::User => "userTask",
            TaskType::Send => "sendTask",
            TaskType::Receive => "receiveTask",
            TaskType::Service => "serviceTask",
        }
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gateway element name for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayType {
    Exclusive,
    Parallel,
}

impl GatewayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayType::Exclusive => "exclusiveGateway",
            GatewayType::Parallel => "parallelGateway",
        }
    }
}

impl Display for GatewayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One numbered step of the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub participant: String,
    pub task_type: TaskType,
    pub source_index: usize,
}

/// One conditional or parallel line of the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub id: String,
    pub name: String,
    pub condition: Option<String>,
    pub gateway_type: GatewayType,
    pub source_index: usize,
}

/// Top level partition of the collaboration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub lanes: Vec<Lane>,
}

/// One participant's lane within a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub id: String,
    pub name: String,
}

/// Communication between two adjacent tasks owned by different participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFlow {
    pub id: String,
    pub source_ref: String,
    pub target_ref: String,
    pub source_participant: String,
    pub target_participant: String,
}

/// Everything extracted from one process description. Rebuilt from scratch on
/// every call; nothing is shared between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessModel {
    pub tasks: Vec<Task>,
    pub decisions: Vec<Decision>,
    pub participants: Vec<String>,
    pub pools: Vec<Pool>,
    pub message_flows: Vec<MessageFlow>,
}

impl ProcessModel {
    /// Build the model from a multi-line description. Total over any input:
    /// text with no usable lines yields an empty but valid model.
    pub fn from_text(text: &str) -> Self {
        let mut model = ProcessModel::default();

        let lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
        for (index, line) in lines.enumerate() {
            match analyze::classify(line) {
                Some(LineKind::Task(name)) => {
                    let participant = analyze::resolve_participant(&name);
                    let task = Task {
                        id: format!("Task_{}", index + 1),
                        task_type: analyze::task_type(&name),
                        participant: participant.clone(),
                        name,
                        source_index: index,
                    };
                    debug!("{} -> {} ({})", task.id, task.participant, task.task_type);
                    model.tasks.push(task);
                    if !model.participants.contains(&participant) {
                        model.participants.push(participant);
                    }
                }
                Some(LineKind::Exclusive(condition)) => {
                    model.decisions.push(Decision {
                        id: format!("Decision_{}", index + 1),
                        name: condition.clone(),
                        condition: Some(condition),
                        gateway_type: GatewayType::Exclusive,
                        source_index: index,
                    });
                }
                Some(LineKind::Parallel(name)) => {
                    model.decisions.push(Decision {
                        id: format!("Parallel_{}", index + 1),
                        name,
                        condition: None,
                        gateway_type: GatewayType::Parallel,
                        source_index: index,
                    });
                }
                None => debug!("ignored line {index}: {line}"),
            }
        }

        model.pools = pools::partition(&model.participants);
        model.message_flows = message_flows(&model.tasks);
        model
    }

    /// Flow nodes between the start and end event.
    pub fn element_count(&self) -> usize {
        self.tasks.len() + self.decisions.len()
    }
}

// One message flow per adjacent task pair whose participants differ. The id
// carries the source task's position, so ids may skip numbers.
fn message_flows(tasks: &[Task]) -> Vec<MessageFlow> {
    tasks
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].participant != pair[1].participant)
        .map(|(i, pair)| MessageFlow {
            id: format!("MessageFlow_{}", i + 1),
            source_ref: pair[0].id.clone(),
            target_ref: pair[1].id.clone(),
            source_participant: pair[0].participant.clone(),
            target_participant: pair[1].participant.clone(),
        })
        .collect()
}
