use super::Error;

use aws_sdk_dynamodbstreams::types;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    Insert,
    Modify,
    Remove,
}

impl TryFrom<types::OperationType> for OperationType {
    type Error = Error;

    fn try_from(value: types::OperationType) -> Result<OperationType, Error> {
        match value {
            types::OperationType::Insert => Ok(OperationType::Insert),
            types::OperationType::Modify => Ok(OperationType::Modify),
            types::OperationType::Remove => Ok(OperationType::Remove),
            other => Err(Error::MalformedRecord(format!(
                "unknown event name `{}`",
                other.as_str()
            ))),
        }
    }
}
