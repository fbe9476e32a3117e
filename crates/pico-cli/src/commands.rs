//! One-shot commands: `serve`, `list`, `add`, `edit` and `remove`.
//!
//! The client commands fetch the whole list, change it, and post it back
//! straight away. There is no debounce outside of `session`.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use pico_api::{Server, ServerConfig};
use pico_client::PicoClient;
use pico_core::{Block, BlockList, BlockPatch};
use pico_storage::{BlockStorage, FileStorage, MemoryStorage};

use crate::cli::ServeArgs;
use crate::config::PicoConfig;
use crate::render::render_blocks;
use crate::{Error, Result};

// ============================================================================
// serve
// ============================================================================

/// Which backend `serve` should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChoice {
    /// Keep blocks in memory; lost on exit.
    Memory,
    /// A JSON file on disk.
    File(PathBuf),
}

/// Server settings after command-line overrides are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ServePlan {
    /// Listener and router settings.
    pub server: ServerConfig,
    /// Storage backend.
    pub storage: StorageChoice,
}

/// Merge `pico serve` flags over the loaded configuration.
pub fn plan_serve(config: &PicoConfig, args: ServeArgs) -> ServePlan {
    let mut server = config.server.clone();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(dir) = args.static_dir {
        server.static_dir = PathBuf::from(dir);
    }

    let storage = if args.memory {
        StorageChoice::Memory
    } else {
        StorageChoice::File(
            args.data
                .map(PathBuf::from)
                .unwrap_or_else(|| config.storage.data_path.clone()),
        )
    };

    ServePlan { server, storage }
}

/// Open the chosen backend.
pub async fn open_storage(choice: &StorageChoice) -> Result<Arc<dyn BlockStorage>> {
    let storage: Arc<dyn BlockStorage> = match choice {
        StorageChoice::Memory => Arc::new(MemoryStorage::new()),
        StorageChoice::File(path) => Arc::new(FileStorage::open(path.clone()).await?),
    };
    Ok(storage)
}

/// Run the server until Ctrl-C.
pub async fn cmd_serve(config: &PicoConfig, args: ServeArgs) -> Result<()> {
    let plan = plan_serve(config, args);
    let storage = open_storage(&plan.storage).await?;
    tracing::info!(storage = %storage.describe(), "Storage ready");
    Server::new(plan.server, storage).serve().await?;
    Ok(())
}

// ============================================================================
// client commands
// ============================================================================

/// Print every stored block.
pub async fn cmd_list(client: &PicoClient, out: &mut impl Write) -> Result<()> {
    let blocks = client.fetch().await?;
    write!(out, "{}", render_blocks(&blocks))?;
    Ok(())
}

/// Append a block and save.
pub async fn cmd_add(
    client: &PicoClient,
    heading: String,
    body: String,
    out: &mut impl Write,
) -> Result<()> {
    let mut list = BlockList::from_blocks(client.fetch().await?);
    list.create(Block::new(heading, body));
    client.save(&list.snapshot()).await?;
    writeln!(out, "Added block {}", list.len() - 1)?;
    Ok(())
}

/// Change the heading and/or body of the block at `index` and save.
pub async fn cmd_edit(
    client: &PicoClient,
    index: usize,
    patch: BlockPatch,
    out: &mut impl Write,
) -> Result<()> {
    if patch.is_empty() {
        return Err(Error::usage("Nothing to change: pass --heading or --body"));
    }
    let mut list = BlockList::from_blocks(client.fetch().await?);
    let id = list.id_at(index)?;
    let before = list.revision();
    list.update(id, patch)?;
    if list.revision() == before {
        writeln!(out, "Block {index} unchanged")?;
        return Ok(());
    }
    client.save(&list.snapshot()).await?;
    writeln!(out, "Updated block {index}")?;
    Ok(())
}

/// Delete the block at `index` and save.
pub async fn cmd_remove(client: &PicoClient, index: usize, out: &mut impl Write) -> Result<()> {
    let mut list = BlockList::from_blocks(client.fetch().await?);
    let id = list.id_at(index)?;
    let removed = list.remove(id)?;
    client.save(&list.snapshot()).await?;
    writeln!(out, "Removed block {index} ({})", display_heading(&removed))?;
    Ok(())
}

fn display_heading(block: &Block) -> &str {
    if block.heading.is_empty() {
        "untitled"
    } else {
        &block.heading
    }
}
