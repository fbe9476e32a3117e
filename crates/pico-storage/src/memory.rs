//! In-memory storage.

use async_trait::async_trait;
use pico_core::Block;
use tokio::sync::RwLock;

use crate::{BlockStorage, Result};

/// Keeps blocks in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blocks: RwLock<Vec<Block>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `blocks`.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: RwLock::new(blocks),
        }
    }
}

#[async_trait]
impl BlockStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Block>> {
        Ok(self.blocks.read().await.clone())
    }

    async fn save(&self, blocks: &[Block]) -> Result<()> {
        *self.blocks.write().await = blocks.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
