//! The storage abstraction.

use async_trait::async_trait;
use pico_core::Block;

use crate::Result;

/// Load and replace the full list of blocks.
///
/// There is no partial update: every save replaces the whole list.
#[async_trait]
pub trait BlockStorage: Send + Sync {
    /// Read the stored blocks in order.
    async fn load(&self) -> Result<Vec<Block>>;

    /// Replace the stored blocks.
    async fn save(&self, blocks: &[Block]) -> Result<()>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}
