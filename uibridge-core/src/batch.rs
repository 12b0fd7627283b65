use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::Command;

/// Opcode of the envelope that wraps a flushed batch.
pub const BATCH_UPDATE: &str = "batchUpdate";

/// Ordered run of commands flushed together.
/// Serializes as `["batchUpdate", [command, ...]]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch(pub Vec<Command>);

impl Batch {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Command> {
        self.0
    }

    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Batch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_tuple(2)?;
        envelope.serialize_element(BATCH_UPDATE)?;
        envelope.serialize_element(&self.0)?;
        envelope.end()
    }
}
