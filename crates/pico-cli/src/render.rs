//! Plain-text rendering of the page for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Local};
use pico_core::{Block, BlockList, Theme, format_date};

/// Header line: the date the page would show, and the theme for this hour.
pub fn render_header(now: &DateTime<Local>) -> String {
    let theme = Theme::at(now);
    format!("{}  [{}]", format_date(now.date_naive()), theme.css_class())
}

/// One row. Collapsed rows show only the heading.
pub fn render_row(index: usize, block: &Block, collapsed: bool, out: &mut String) {
    let marker = if collapsed { 'E' } else { 'C' };
    let heading = if block.heading.is_empty() {
        "(heading)"
    } else {
        block.heading.as_str()
    };
    let _ = writeln!(out, "[{index}] {heading}  ({marker})");
    if collapsed {
        return;
    }
    if block.body.is_empty() {
        let _ = writeln!(out, "    write...");
        return;
    }
    for line in block.body.lines() {
        let _ = writeln!(out, "    {line}");
    }
    if block.body_ends_with_newline() {
        let _ = writeln!(out, "    ");
    }
}

/// Every row of an editable list, honouring collapse state.
pub fn render_list(list: &BlockList) -> String {
    let mut out = String::new();
    for (index, row) in list.iter().enumerate() {
        render_row(index, row.block(), row.is_collapsed(), &mut out);
    }
    if list.is_empty() {
        out.push_str("(no blocks; `add` creates one)\n");
    }
    out
}

/// Every block of a fetched list, all expanded.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (index, block) in blocks.iter().enumerate() {
        render_row(index, block, false, &mut out);
    }
    if blocks.is_empty() {
        out.push_str("(no blocks)\n");
    }
    out
}
