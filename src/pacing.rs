use async_trait::async_trait;
use tokio::time::{sleep, Duration};

/// Delay applied between polls and between dispatched records.
#[async_trait]
pub trait Pacing: Send + Sync {
    async fn pause(&self);
}

/// A fixed interval. `None` means no pause at all.
#[async_trait]
impl Pacing for Option<Duration> {
    async fn pause(&self) {
        if let Some(duration) = self {
            sleep(*duration).await;
        }
    }
}
