use super::{into_item, Error, Item, StreamViewType};

use aws_sdk_dynamodbstreams::types;
use serde::{Deserialize, Serialize};

/// The DynamoDB-specific body of a change record.
///
/// Only the images declared by `StreamViewType` are kept, and absent images are
/// left out of the JSON entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StreamRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    approximate_creation_date_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keys: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_image: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_image: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_view_type: Option<StreamViewType>,
}

impl StreamRecord {
    /// Creation time in seconds since the epoch.
    pub fn approximate_creation_date_time(&self) -> Option<i64> {
        self.approximate_creation_date_time
    }

    pub fn keys(&self) -> Option<&Item> {
        self.keys.as_ref()
    }

    pub fn new_image(&self) -> Option<&Item> {
        self.new_image.as_ref()
    }

    pub fn old_image(&self) -> Option<&Item> {
        self.old_image.as_ref()
    }

    pub fn sequence_number(&self) -> Option<&str> {
        self.sequence_number.as_deref()
    }

    pub fn stream_view_type(&self) -> Option<StreamViewType> {
        self.stream_view_type
    }
}

impl TryFrom<types::StreamRecord> for StreamRecord {
    type Error = Error;

    fn try_from(value: types::StreamRecord) -> Result<StreamRecord, Error> {
        let stream_view_type = value
            .stream_view_type
            .map(StreamViewType::try_from)
            .transpose()?;

        // Without a view type, keep whatever images the record carries.
        let has_new = stream_view_type.map_or(true, |v| v.has_new_image());
        let has_old = stream_view_type.map_or(true, |v| v.has_old_image());

        Ok(StreamRecord {
            approximate_creation_date_time: value
                .approximate_creation_date_time
                .map(|dt| dt.secs()),
            keys: value.keys.map(|m| into_item("Keys", m)).transpose()?,
            new_image: value
                .new_image
                .filter(|_| has_new)
                .map(|m| into_item("NewImage", m))
                .transpose()?,
            old_image: value
                .old_image
                .filter(|_| has_old)
                .map(|m| into_item("OldImage", m))
                .transpose()?,
            sequence_number: value.sequence_number,
            size_bytes: value.size_bytes,
            stream_view_type,
        })
    }
}
