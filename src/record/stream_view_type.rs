use super::Error;

use aws_sdk_dynamodbstreams::types;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamViewType {
    KeysOnly,
    NewAndOldImages,
    NewImage,
    OldImage,
}

impl StreamViewType {
    pub fn has_new_image(&self) -> bool {
        matches!(self, Self::NewImage | Self::NewAndOldImages)
    }

    pub fn has_old_image(&self) -> bool {
        matches!(self, Self::OldImage | Self::NewAndOldImages)
    }
}

impl TryFrom<types::StreamViewType> for StreamViewType {
    type Error = Error;

    fn try_from(value: types::StreamViewType) -> Result<StreamViewType, Error> {
        match value {
            types::StreamViewType::KeysOnly => Ok(StreamViewType::KeysOnly),
            types::StreamViewType::NewAndOldImages => Ok(StreamViewType::NewAndOldImages),
            types::StreamViewType::NewImage => Ok(StreamViewType::NewImage),
            types::StreamViewType::OldImage => Ok(StreamViewType::OldImage),
            other => Err(Error::MalformedRecord(format!(
                "unknown stream view type `{}`",
                other.as_str()
            ))),
        }
    }
}
