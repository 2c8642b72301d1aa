use aws_sdk_dynamodbstreams as dynamodbstreams;

#[derive(Debug, Clone)]
pub struct Shard {
    id: String,
    iterator: Option<String>,
}

impl Shard {
    pub fn new(shard: dynamodbstreams::types::Shard) -> Option<Self> {
        shard.shard_id.map(|id| Self { id, iterator: None })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn iterator(&self) -> Option<&str> {
        self.iterator.as_deref()
    }

    /// Replace the shard iterator. An empty iterator means the shard is closed
    /// and is stored as `None`.
    pub fn set_iterator(self, iterator: Option<String>) -> Self {
        Self {
            iterator: iterator.filter(|val| !val.is_empty()),
            ..self
        }
    }

    /// Return true once the provider stopped issuing iterators for this shard.
    pub fn is_closed(&self) -> bool {
        self.iterator.is_none()
    }
}
