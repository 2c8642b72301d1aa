use super::{Error, Item};

use aws_sdk_dynamodbstreams::types;
use aws_smithy_types::base64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single attribute of a table item.
///
/// Serialized as a one-key object whose key is the DynamoDB type descriptor,
/// e.g. `{"S": "Hello"}` or `{"L": [{"N": "1"}]}`. Binary values are base64 encoded.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeValue {
    B(String),
    Bool(bool),
    Bs(Vec<String>),
    L(Vec<AttributeValue>),
    M(Item),
    N(String),
    Ns(Vec<String>),
    Null(bool),
    S(String),
    Ss(Vec<String>),
}

impl AttributeValue {
    /// The type descriptor this value is serialized under.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::B(_) => "B",
            Self::Bool(_) => "BOOL",
            Self::Bs(_) => "BS",
            Self::L(_) => "L",
            Self::M(_) => "M",
            Self::N(_) => "N",
            Self::Ns(_) => "NS",
            Self::Null(_) => "NULL",
            Self::S(_) => "S",
            Self::Ss(_) => "SS",
        }
    }
}

/// Convert an SDK attribute value. `path` names the attribute in error messages.
pub(super) fn into_value(
    path: &str,
    value: types::AttributeValue,
) -> Result<AttributeValue, Error> {
    let value = match value {
        types::AttributeValue::B(v) => AttributeValue::B(base64::encode(v)),
        types::AttributeValue::Bool(v) => AttributeValue::Bool(v),
        types::AttributeValue::Bs(v) => {
            AttributeValue::Bs(v.into_iter().map(|b| base64::encode(b)).collect())
        }
        types::AttributeValue::L(v) => AttributeValue::L(
            v.into_iter()
                .enumerate()
                .map(|(i, val)| into_value(&format!("{path}[{i}]"), val))
                .collect::<Result<Vec<AttributeValue>, Error>>()?,
        ),
        types::AttributeValue::M(v) => AttributeValue::M(into_item(path, v)?),
        types::AttributeValue::N(v) => AttributeValue::N(v),
        types::AttributeValue::Ns(v) => AttributeValue::Ns(v),
        types::AttributeValue::Null(v) => AttributeValue::Null(v),
        types::AttributeValue::S(v) => AttributeValue::S(v),
        types::AttributeValue::Ss(v) => AttributeValue::Ss(v),
        _ => {
            return Err(Error::MalformedRecord(format!(
                "attribute `{path}` has no known type"
            )))
        }
    };
    Ok(value)
}

/// Convert an SDK attribute map nested under `path`.
pub(super) fn into_item(
    path: &str,
    value: HashMap<String, types::AttributeValue>,
) -> Result<Item, Error> {
    value
        .into_iter()
        .map(|(key, val)| {
            let path = format!("{path}.{key}");
            into_value(&path, val).map(|val| (key, val))
        })
        .collect()
}
