//! A fetched block list wired to an autosaver.

use std::sync::Arc;
use std::time::Duration;

use pico_core::{Block, BlockList};

use crate::autosave::{Autosaver, SaveStatus, SaveTarget};
use crate::{PicoClient, Result};

/// The editor's state: the blocks being edited plus the task saving them.
///
/// Loading does not count as an edit; only changes made through
/// [`list_mut`](Self::list_mut) are saved.
#[derive(Debug)]
pub struct Notebook {
    list: BlockList,
    saver: Autosaver,
}

impl Notebook {
    /// Fetch the blocks from the server and start autosaving back to it.
    pub async fn open(client: PicoClient, delay: Duration) -> Result<Self> {
        let blocks = client.fetch().await?;
        tracing::info!(count = blocks.len(), server = client.base_url(), "Notebook opened");
        Ok(Self::with_target(blocks, Arc::new(client), delay))
    }

    /// Start from `blocks` and autosave to an arbitrary target.
    pub fn with_target(blocks: Vec<Block>, target: Arc<dyn SaveTarget>, delay: Duration) -> Self {
        let list = BlockList::from_blocks(blocks);
        let saver = Autosaver::spawn(target, delay, list.subscribe());
        Self { list, saver }
    }

    /// The blocks being edited.
    pub fn list(&self) -> &BlockList {
        &self.list
    }

    /// Mutable access; every persisted change schedules a save.
    pub fn list_mut(&mut self) -> &mut BlockList {
        &mut self.list
    }

    /// Current save status.
    pub fn status(&self) -> SaveStatus {
        self.saver.status()
    }

    /// Save pending edits now.
    pub async fn flush(&self) -> Result<()> {
        self.saver.flush().await
    }

    /// Save pending edits and stop autosaving.
    pub async fn close(self) -> SaveStatus {
        let Self { list, saver } = self;
        drop(list);
        saver.finish().await
    }
}
