//! The editable, ordered list of blocks.
//!
//! [`BlockList`] is the in-memory model behind the page. Every mutation of
//! persisted state (create, update, remove, reset) publishes a fresh snapshot
//! on a [`watch`] channel; the autosaver subscribes to that feed. Collapsing a
//! row is view state only and is never published.

use tokio::sync::watch;

use crate::{Block, BlockPatch, Error, Result, RowId};

// ============================================================================
// Row
// ============================================================================

/// A block plus its editor-only state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    block: Block,
    collapsed: bool,
}

impl Row {
    fn new(block: Block) -> Self {
        Self {
            id: RowId::new(),
            block,
            collapsed: false,
        }
    }

    /// Row identity.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The block held by this row.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Whether the body is hidden.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

// ============================================================================
// BlockList
// ============================================================================

/// Ordered collection of rows bound to a change feed.
#[derive(Debug)]
pub struct BlockList {
    rows: Vec<Row>,
    tx: watch::Sender<Vec<Block>>,
    revision: u64,
}

impl BlockList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::from_blocks(Vec::new())
    }

    /// Creates a list holding `blocks`, all expanded.
    ///
    /// The initial contents are the feed's starting value, so subscribers
    /// see only later mutations as changes.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let (tx, _rx) = watch::channel(blocks.clone());
        Self {
            rows: blocks.into_iter().map(Row::new).collect(),
            tx,
            revision: 0,
        }
    }

    /// Subscribe to snapshots published after each change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Block>> {
        self.tx.subscribe()
    }

    /// Number of changes published so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces every row. Rows get fresh ids and start expanded.
    pub fn reset(&mut self, blocks: Vec<Block>) {
        self.rows = blocks.into_iter().map(Row::new).collect();
        self.publish();
    }

    /// Appends a block and returns its row id.
    pub fn create(&mut self, block: Block) -> RowId {
        let row = Row::new(block);
        let id = row.id;
        self.rows.push(row);
        self.publish();
        id
    }

    /// Applies a partial update. Publishes only if the block changed.
    pub fn update(&mut self, id: RowId, patch: BlockPatch) -> Result<()> {
        let row = self.row_mut(id)?;
        if row.block.apply(patch) {
            self.publish();
        }
        Ok(())
    }

    /// Replaces the heading of a row.
    pub fn set_heading(&mut self, id: RowId, heading: impl Into<String>) -> Result<()> {
        self.update(id, BlockPatch::heading(heading))
    }

    /// Replaces the body of a row.
    pub fn set_body(&mut self, id: RowId, body: impl Into<String>) -> Result<()> {
        self.update(id, BlockPatch::body(body))
    }

    /// Removes a row and returns its block.
    pub fn remove(&mut self, id: RowId) -> Result<Block> {
        let index = self.position(id).ok_or_else(|| Error::row_not_found(id))?;
        let row = self.rows.remove(index);
        self.publish();
        Ok(row.block)
    }

    /// Flips the collapsed flag and returns the new value.
    pub fn toggle_collapse(&mut self, id: RowId) -> Result<bool> {
        let row = self.row_mut(id)?;
        row.collapsed = !row.collapsed;
        Ok(row.collapsed)
    }

    /// Looks up a row by id.
    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Position of a row in display order.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Row id at a display position.
    pub fn id_at(&self, index: usize) -> Result<RowId> {
        self.rows
            .get(index)
            .map(|row| row.id)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
    }

    /// Rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The persisted form of the list.
    pub fn snapshot(&self) -> Vec<Block> {
        self.rows.iter().map(|row| row.block.clone()).collect()
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut Row> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| Error::row_not_found(id))
    }

    fn publish(&mut self) {
        self.revision += 1;
        log::debug!(
            "Block list changed (revision {}, {} blocks)",
            self.revision,
            self.rows.len()
        );
        self.tx.send_replace(self.snapshot());
    }
}

impl Default for BlockList {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
