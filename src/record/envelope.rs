use super::{ChangeRecord, Error};

use serde::{Deserialize, Serialize};

/// The document handed to the sink: `{"Records": [...]}`, the shape Lambda
/// passes to DynamoDB Streams triggers.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EventEnvelope {
    records: Vec<ChangeRecord>,
}

impl EventEnvelope {
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}

impl From<ChangeRecord> for EventEnvelope {
    fn from(record: ChangeRecord) -> EventEnvelope {
        EventEnvelope {
            records: vec![record],
        }
    }
}
