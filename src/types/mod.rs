mod outputs;
mod shard;

pub use outputs::{GetRecordsOutput, GetShardsOutput};
pub use shard::Shard;
