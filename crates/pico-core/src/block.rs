//! The `Block` record and its partial-update patch.
//!
//! On the wire a block is `{ "h": <heading>, "b": <body> }`. Both fields are
//! required when decoding.

use serde::{Deserialize, Serialize};

use crate::Result;

/// A note: a heading line and a free-form body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Single-line heading.
    #[serde(rename = "h")]
    pub heading: String,

    /// Body text, may span multiple lines.
    #[serde(rename = "b")]
    pub body: String,
}

impl Block {
    /// Creates a block from a heading and body.
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// The block the "Add" action creates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the body ends in a newline.
    ///
    /// The page mirrors the body in a hidden element to size the textarea;
    /// a trailing newline needs an extra line of height.
    pub fn body_ends_with_newline(&self) -> bool {
        self.body.ends_with('\n')
    }

    /// Applies a patch in place. Returns `true` if anything changed.
    pub fn apply(&mut self, patch: BlockPatch) -> bool {
        let mut changed = false;
        if let Some(heading) = patch.heading {
            changed |= self.heading != heading;
            self.heading = heading;
        }
        if let Some(body) = patch.body {
            changed |= self.body != body;
            self.body = body;
        }
        changed
    }
}

/// Partial update to a [`Block`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    /// New heading, if set.
    pub heading: Option<String>,
    /// New body, if set.
    pub body: Option<String>,
}

impl BlockPatch {
    /// Patch that replaces only the heading.
    pub fn heading(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            body: None,
        }
    }

    /// Patch that replaces only the body.
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            heading: None,
            body: Some(body.into()),
        }
    }

    /// Adds a body replacement to this patch.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// True when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.body.is_none()
    }
}

/// Decodes a JSON array of blocks.
pub fn decode_blocks(json: &[u8]) -> Result<Vec<Block>> {
    Ok(serde_json::from_slice(json)?)
}

/// Encodes blocks as a compact JSON array.
pub fn encode_blocks(blocks: &[Block]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(blocks)?)
}
