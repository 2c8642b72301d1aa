use aws_sdk_dynamodbstreams::types;
use serde::{Deserialize, Serialize};

/// Present on records deleted by the Time to Live process.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(skip_serializing_if = "Option::is_none")]
    principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,
}

impl From<types::Identity> for Identity {
    fn from(value: types::Identity) -> Identity {
        Identity {
            principal_id: value.principal_id,
            r#type: value.r#type,
        }
    }
}
