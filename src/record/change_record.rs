use super::{Error, Identity, OperationType, StreamRecord};

use aws_sdk_dynamodbstreams::types;
use serde::{Deserialize, Serialize};

/// One captured mutation, in the field order of the event-notification schema.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    aws_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamodb: Option<StreamRecord>,
    #[serde(rename = "eventID", skip_serializing_if = "Option::is_none")]
    event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_name: Option<OperationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_version: Option<String>,
    #[serde(rename = "eventSourceARN", skip_serializing_if = "Option::is_none")]
    event_source_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_identity: Option<Identity>,
}

impl ChangeRecord {
    /// Set the stream the record was read from. The wire record does not carry it.
    pub fn with_event_source_arn(self, stream_arn: impl Into<String>) -> Self {
        Self {
            event_source_arn: Some(stream_arn.into()),
            ..self
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub fn event_name(&self) -> Option<OperationType> {
        self.event_name
    }

    pub fn event_source_arn(&self) -> Option<&str> {
        self.event_source_arn.as_deref()
    }

    pub fn dynamodb(&self) -> Option<&StreamRecord> {
        self.dynamodb.as_ref()
    }
}

impl TryFrom<types::Record> for ChangeRecord {
    type Error = Error;

    fn try_from(value: types::Record) -> Result<ChangeRecord, Error> {
        Ok(ChangeRecord {
            aws_region: value.aws_region,
            dynamodb: value.dynamodb.map(StreamRecord::try_from).transpose()?,
            event_id: value.event_id,
            event_name: value.event_name.map(OperationType::try_from).transpose()?,
            event_source: value.event_source,
            event_version: value.event_version,
            event_source_arn: None,
            user_identity: value.user_identity.map(Identity::from),
        })
    }
}
