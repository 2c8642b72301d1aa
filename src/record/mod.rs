//! Conversion of DynamoDB Streams records into the JSON event shape used by
//! Lambda stream triggers.

mod attribute_value;
mod change_record;
mod envelope;
mod identity;
mod operation_type;
mod stream_record;
mod stream_view_type;

use super::error::Error;
use attribute_value::into_item;

pub use attribute_value::AttributeValue;
pub use change_record::ChangeRecord;
pub use envelope::EventEnvelope;
pub use identity::Identity;
pub use operation_type::OperationType;
pub use stream_record::StreamRecord;
pub use stream_view_type::StreamViewType;

use aws_sdk_dynamodbstreams::types;
use std::collections::BTreeMap;

/// Attribute name to value. Ordered, so the serialized form is stable.
pub type Item = BTreeMap<String, AttributeValue>;

/// Wrap one raw record read from `stream_arn` into a single-record envelope.
///
/// Fails with [`Error::MalformedRecord`] if the record holds an attribute value,
/// event name or view type this crate does not know.
pub fn transform(record: types::Record, stream_arn: &str) -> Result<EventEnvelope, Error> {
    ChangeRecord::try_from(record)
        .map(|record| record.with_event_source_arn(stream_arn))
        .map(EventEnvelope::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodbstreams::{
        primitives::DateTime,
        types::{AttributeValue as Av, Identity as SdkIdentity, OperationType as SdkOp},
    };
    use serde_json::{json, Value};

    const ARN: &str = "arn:aws:dynamodb:us-east-1:123456789012:table/People/stream/2024-01-01T00:00:00.000";

    fn stream_record(view: types::StreamViewType) -> types::StreamRecord {
        let created = DateTime::from_secs_and_nanos(1_700_000_000, 250_000_000);

        types::StreamRecord::builder()
            .approximate_creation_date_time(created)
            .keys("Id", Av::S("pk0".into()))
            .new_image("Id", Av::S("pk0".into()))
            .new_image("Age", Av::N("35".into()))
            .old_image("Id", Av::S("pk0".into()))
            .old_image("Age", Av::N("34".into()))
            .sequence_number("111100000000000000000001")
            .size_bytes(42)
            .stream_view_type(view)
            .build()
    }

    fn record(view: types::StreamViewType) -> types::Record {
        types::Record::builder()
            .aws_region("us-east-1")
            .dynamodb(stream_record(view))
            .event_id("c81d3b8ee2f8b85b1c8b2d")
            .event_name(SdkOp::Modify)
            .event_source("aws:dynamodb")
            .event_version("1.1")
            .build()
    }

    fn encode(record: types::Record) -> Value {
        let json = transform(record, ARN).unwrap().to_pretty_json().unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn it_produces_a_single_record_envelope() {
        let json = encode(record(types::StreamViewType::NewAndOldImages));

        let expected = json!({
            "Records": [
                {
                    "awsRegion": "us-east-1",
                    "dynamodb": {
                        "ApproximateCreationDateTime": 1_700_000_000,
                        "Keys": { "Id": { "S": "pk0" } },
                        "NewImage": { "Age": { "N": "35" }, "Id": { "S": "pk0" } },
                        "OldImage": { "Age": { "N": "34" }, "Id": { "S": "pk0" } },
                        "SequenceNumber": "111100000000000000000001",
                        "SizeBytes": 42,
                        "StreamViewType": "NEW_AND_OLD_IMAGES"
                    },
                    "eventID": "c81d3b8ee2f8b85b1c8b2d",
                    "eventName": "MODIFY",
                    "eventSource": "aws:dynamodb",
                    "eventVersion": "1.1",
                    "eventSourceARN": ARN
                }
            ]
        });
        assert_eq!(json, expected);
    }

    #[test]
    fn it_keeps_field_order_of_the_schema() {
        let envelope = transform(record(types::StreamViewType::NewAndOldImages), ARN).unwrap();
        let json = envelope.to_pretty_json().unwrap();

        let fields = [
            "\"Records\"",
            "\"awsRegion\"",
            "\"dynamodb\"",
            "\"ApproximateCreationDateTime\"",
            "\"Keys\"",
            "\"NewImage\"",
            "\"OldImage\"",
            "\"SequenceNumber\"",
            "\"SizeBytes\"",
            "\"StreamViewType\"",
            "\"eventID\"",
            "\"eventName\"",
            "\"eventSource\"",
            "\"eventVersion\"",
            "\"eventSourceARN\"",
        ];
        let positions = fields
            .iter()
            .map(|field| json.find(field).unwrap())
            .collect::<Vec<usize>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.starts_with("{\n  \"Records\": [\n"));
    }

    #[test]
    fn keys_only_record_omits_both_images() {
        let json = encode(record(types::StreamViewType::KeysOnly));
        let dynamodb = json["Records"][0]["dynamodb"].as_object().unwrap();

        assert!(dynamodb.contains_key("Keys"));
        assert!(!dynamodb.contains_key("NewImage"));
        assert!(!dynamodb.contains_key("OldImage"));
        assert_eq!(dynamodb["StreamViewType"], "KEYS_ONLY");
    }

    #[test]
    fn single_image_view_types_keep_only_their_image() {
        let json = encode(record(types::StreamViewType::NewImage));
        let dynamodb = json["Records"][0]["dynamodb"].as_object().unwrap();
        assert!(dynamodb.contains_key("NewImage"));
        assert!(!dynamodb.contains_key("OldImage"));

        let json = encode(record(types::StreamViewType::OldImage));
        let dynamodb = json["Records"][0]["dynamodb"].as_object().unwrap();
        assert!(!dynamodb.contains_key("NewImage"));
        assert!(dynamodb.contains_key("OldImage"));
    }

    #[test]
    fn absent_images_are_omitted_not_null() {
        let body = types::StreamRecord::builder()
            .keys("Id", Av::S("pk0".into()))
            .old_image("Id", Av::S("pk0".into()))
            .stream_view_type(types::StreamViewType::NewAndOldImages)
            .build();
        let raw = types::Record::builder()
            .event_name(SdkOp::Remove)
            .dynamodb(body)
            .build();

        let json = encode(raw);
        let record = json["Records"][0].as_object().unwrap();
        let dynamodb = record["dynamodb"].as_object().unwrap();

        assert!(!dynamodb.contains_key("NewImage"));
        assert!(dynamodb.contains_key("OldImage"));
        assert!(!dynamodb.contains_key("ApproximateCreationDateTime"));
        assert!(!record.contains_key("awsRegion"));
        assert!(!record.contains_key("userIdentity"));
        assert!(!record.values().any(Value::is_null));
    }

    #[test]
    fn it_carries_user_identity_of_ttl_deletions() {
        let identity = SdkIdentity::builder()
            .principal_id("dynamodb.amazonaws.com")
            .r#type("Service")
            .build();
        let raw = types::Record::builder()
            .event_name(SdkOp::Remove)
            .user_identity(identity)
            .build();

        let json = encode(raw);
        assert_eq!(
            json["Records"][0]["userIdentity"],
            json!({ "principalId": "dynamodb.amazonaws.com", "type": "Service" })
        );
    }

    #[test]
    fn decoded_envelope_reproduces_attribute_variants() {
        let nested = Av::M(
            [
                ("tags".to_string(), Av::Ss(vec!["a".into(), "b".into()])),
                (
                    "history".to_string(),
                    Av::L(vec![Av::M(
                        [(
                            "at".to_string(),
                            Av::L(vec![Av::N("1".into()), Av::Null(true)]),
                        )]
                        .into_iter()
                        .collect(),
                    )]),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let body = types::StreamRecord::builder()
            .keys("Id", Av::S("pk0".into()))
            .new_image("Id", Av::S("pk0".into()))
            .new_image("Doc", nested)
            .new_image("Active", Av::Bool(true))
            .stream_view_type(types::StreamViewType::NewImage)
            .build();
        let raw = types::Record::builder()
            .event_name(SdkOp::Insert)
            .dynamodb(body)
            .build();

        let envelope = transform(raw, ARN).unwrap();
        let json = envelope.to_pretty_json().unwrap();
        let decoded: EventEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, envelope);

        let image = decoded.records()[0].dynamodb().unwrap().new_image().unwrap();
        assert_eq!(image["Active"], AttributeValue::Bool(true));
        let AttributeValue::M(doc) = &image["Doc"] else {
            panic!("Doc is not a map");
        };
        assert_eq!(doc["tags"].tag(), "SS");
        let AttributeValue::L(history) = &doc["history"] else {
            panic!("history is not a list");
        };
        let AttributeValue::M(entry) = &history[0] else {
            panic!("history entry is not a map");
        };
        assert_eq!(
            entry["at"],
            AttributeValue::L(vec![
                AttributeValue::N("1".into()),
                AttributeValue::Null(true)
            ])
        );
    }

    #[test]
    fn it_injects_the_stream_arn() {
        let envelope = transform(record(types::StreamViewType::KeysOnly), ARN).unwrap();
        let record = &envelope.records()[0];
        assert_eq!(record.event_source_arn(), Some(ARN));
        assert_eq!(record.event_name(), Some(OperationType::Modify));
        assert_eq!(
            record.dynamodb().unwrap().approximate_creation_date_time(),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn unknown_event_name_is_a_malformed_record() {
        let raw = types::Record::builder()
            .event_name(SdkOp::from("UPSERT"))
            .build();
        let err = transform(raw, ARN).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(ref msg) if msg.contains("UPSERT")));
    }

    #[test]
    fn unknown_view_type_is_a_malformed_record() {
        let body = types::StreamRecord::builder()
            .stream_view_type(types::StreamViewType::from("EVERYTHING"))
            .build();
        let raw = types::Record::builder().dynamodb(body).build();
        assert!(matches!(
            transform(raw, ARN),
            Err(Error::MalformedRecord(_))
        ));
    }
}
