use serde::Serialize;
use serde_json::Value;
use uibridge_core_macros::UiCommand;

/// Opaque host-side node identifier. The bridge never interprets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        NodeId(i64::from(id))
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(i64::from(id))
    }
}

/// Where `insertAdjacentNode` places the node relative to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjacentPosition {
    BeforeBegin,
    AfterBegin,
    BeforeEnd,
    AfterEnd,
}

/// One mutation instruction for the host renderer.
///
/// Serializes as `[opcode, [args...]]` with the fields below in order.
#[derive(Clone, Debug, PartialEq, UiCommand)]
pub enum Command {
    CreateElement {
        id: NodeId,
        tag: String,
    },
    CreateTextNode {
        id: NodeId,
        data: String,
    },
    CreateComment {
        id: NodeId,
        data: String,
    },
    InsertAdjacentNode {
        parent: NodeId,
        position: AdjacentPosition,
        node: NodeId,
    },
    RemoveNode {
        id: NodeId,
    },
    SetProperty {
        id: NodeId,
        key: String,
        value: Value,
    },
    RemoveProperty {
        id: NodeId,
        key: String,
    },
    SetStyle {
        id: NodeId,
        key: String,
        value: String,
    },
    AddEvent {
        id: NodeId,
        event: String,
    },
    RemoveEvent {
        id: NodeId,
        event: String,
    },
    /// Imperative call on a host node. Sent directly, never batched.
    Method {
        id: NodeId,
        name: String,
        params: Vec<Value>,
    },
}

impl Command {
    /// Serialize this command on its own, outside any batch envelope.
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn create_element(id: impl Into<NodeId>, tag: impl Into<String>) -> Command {
    Command::CreateElement {
        id: id.into(),
        tag: tag.into(),
    }
}

pub fn create_text_node(id: impl Into<NodeId>, data: impl Into<String>) -> Command {
    Command::CreateTextNode {
        id: id.into(),
        data: data.into(),
    }
}

pub fn create_comment(id: impl Into<NodeId>, data: impl Into<String>) -> Command {
    Command::CreateComment {
        id: id.into(),
        data: data.into(),
    }
}

pub fn insert_adjacent_node(
    parent: impl Into<NodeId>,
    position: AdjacentPosition,
    node: impl Into<NodeId>,
) -> Command {
    Command::InsertAdjacentNode {
        parent: parent.into(),
        position,
        node: node.into(),
    }
}

pub fn remove_node(id: impl Into<NodeId>) -> Command {
    Command::RemoveNode { id: id.into() }
}

pub fn set_property(
    id: impl Into<NodeId>,
    key: impl Into<String>,
    value: impl Into<Value>,
) -> Command {
    Command::SetProperty {
        id: id.into(),
        key: key.into(),
        value: value.into(),
    }
}

pub fn remove_property(id: impl Into<NodeId>, key: impl Into<String>) -> Command {
    Command::RemoveProperty {
        id: id.into(),
        key: key.into(),
    }
}

pub fn set_style(
    id: impl Into<NodeId>,
    key: impl Into<String>,
    value: impl Into<String>,
) -> Command {
    Command::SetStyle {
        id: id.into(),
        key: key.into(),
        value: value.into(),
    }
}

pub fn add_event(id: impl Into<NodeId>, event: impl Into<String>) -> Command {
    Command::AddEvent {
        id: id.into(),
        event: event.into(),
    }
}

pub fn remove_event(id: impl Into<NodeId>, event: impl Into<String>) -> Command {
    Command::RemoveEvent {
        id: id.into(),
        event: event.into(),
    }
}

pub fn method(id: impl Into<NodeId>, name: impl Into<String>, params: Vec<Value>) -> Command {
    Command::Method {
        id: id.into(),
        name: name.into(),
        params,
    }
}
