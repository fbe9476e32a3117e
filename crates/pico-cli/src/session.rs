//! Interactive editing with autosave.
//!
//! Each input line is one command. Edits go through the notebook's block
//! list, so saving follows the same debounce as the web page.

use std::io::Write;

use chrono::{Local, Utc};
use pico_client::{Notebook, SaveStatus};
use pico_core::Block;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::{render_header, render_list};
use crate::{Error, Result};

const HELP: &str = "\
commands:
  add [heading]     append a block
  h N text          set the heading of block N
  b N text          set the body of block N (\\n for a new line)
  rm N              remove block N
  t N               collapse or expand block N
  show              print the page
  status            print the save status
  save              save now
  help              this text
  quit              save and leave
";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Append a block with this heading.
    Add(String),
    /// Replace the heading of a block.
    Heading(usize, String),
    /// Replace the body of a block.
    Body(usize, String),
    /// Delete a block.
    Remove(usize),
    /// Flip a block between collapsed and expanded.
    Toggle(usize),
    /// Print the page.
    Show,
    /// Print the save status.
    Status,
    /// Save pending edits now.
    Save,
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let command = match word {
        "add" | "a" => SessionCommand::Add(rest.to_string()),
        "h" | "heading" => {
            let (index, text) = index_and_text(word, rest)?;
            SessionCommand::Heading(index, text.to_string())
        }
        "b" | "body" => {
            let (index, text) = index_and_text(word, rest)?;
            SessionCommand::Body(index, unescape(text))
        }
        "rm" | "remove" => SessionCommand::Remove(parse_index(word, rest)?),
        "t" | "toggle" => SessionCommand::Toggle(parse_index(word, rest)?),
        "show" | "ls" => SessionCommand::Show,
        "status" => SessionCommand::Status,
        "save" => SessionCommand::Save,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(Error::usage(format!("Unknown command '{other}' (try help)"))),
    };
    Ok(Some(command))
}

fn parse_index(word: &str, arg: &str) -> Result<usize> {
    arg.trim()
        .parse()
        .map_err(|_| Error::usage(format!("'{word}' needs a block number")))
}

fn index_and_text<'a>(word: &str, rest: &'a str) -> Result<(usize, &'a str)> {
    let (index, text) = match rest.split_once(char::is_whitespace) {
        Some((index, text)) => (index, text),
        None => (rest, ""),
    };
    Ok((parse_index(word, index)?, text))
}

/// Turn `\n` into a newline and `\\` into a backslash.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Header, rows, and the status line.
pub fn render_notebook(notebook: &Notebook) -> String {
    let mut page = render_header(&Local::now());
    page.push('\n');
    page.push_str(&render_list(notebook.list()));
    let status = notebook.status().describe(Utc::now());
    if !status.is_empty() {
        page.push_str(&status);
        page.push('\n');
    }
    page
}

/// Apply one command. Returns `false` when the session should end.
pub async fn apply_command(
    notebook: &mut Notebook,
    command: SessionCommand,
    out: &mut impl Write,
) -> Result<bool> {
    match command {
        SessionCommand::Add(heading) => {
            notebook.list_mut().create(Block::new(heading, ""));
            writeln!(out, "Added block {}", notebook.list().len() - 1)?;
        }
        SessionCommand::Heading(index, text) => {
            let id = notebook.list().id_at(index)?;
            notebook.list_mut().set_heading(id, text)?;
        }
        SessionCommand::Body(index, text) => {
            let id = notebook.list().id_at(index)?;
            notebook.list_mut().set_body(id, text)?;
        }
        SessionCommand::Remove(index) => {
            let id = notebook.list().id_at(index)?;
            notebook.list_mut().remove(id)?;
            writeln!(out, "Removed block {index}")?;
        }
        SessionCommand::Toggle(index) => {
            let id = notebook.list().id_at(index)?;
            let collapsed = notebook.list_mut().toggle_collapse(id)?;
            let state = if collapsed { "collapsed" } else { "expanded" };
            writeln!(out, "Block {index} {state}")?;
        }
        SessionCommand::Show => write!(out, "{}", render_notebook(notebook))?,
        SessionCommand::Status => {
            let status = notebook.status();
            match status {
                SaveStatus::Idle => writeln!(out, "No changes")?,
                other => writeln!(out, "{}", other.describe(Utc::now()))?,
            }
        }
        SessionCommand::Save => {
            notebook.flush().await?;
            writeln!(out, "{}", notebook.status().describe(Utc::now()))?;
        }
        SessionCommand::Help => write!(out, "{HELP}")?,
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Read commands until `quit` or end of input.
///
/// Bad commands and out-of-range block numbers are reported and the session
/// carries on. The caller closes the notebook afterwards.
pub async fn run_session<R, W>(notebook: &mut Notebook, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", render_notebook(notebook))?;
    writeln!(out, "Type help for commands.")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        match apply_command(notebook, command, &mut *out).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e @ (Error::Core(_) | Error::Usage(_))) => writeln!(out, "{e}")?,
            Err(e) => return Err(e),
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pico_client::SaveTarget;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        saves: Mutex<Vec<Vec<Block>>>,
    }

    impl Recorder {
        fn saves(&self) -> Vec<Vec<Block>> {
            self.saves.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SaveTarget for Recorder {
        async fn save_blocks(&self, blocks: &[Block]) -> pico_client::Result<()> {
            self.saves.lock().unwrap().push(blocks.to_vec());
            Ok(())
        }
    }

    fn notebook(blocks: Vec<Block>) -> (Notebook, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let notebook = Notebook::with_target(blocks, recorder.clone(), Duration::from_secs(3600));
        (notebook, recorder)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(
            parse_command("add Groceries").unwrap(),
            Some(SessionCommand::Add("Groceries".into()))
        );
        assert_eq!(
            parse_command("add").unwrap(),
            Some(SessionCommand::Add(String::new()))
        );
        assert_eq!(
            parse_command("h 2 New title").unwrap(),
            Some(SessionCommand::Heading(2, "New title".into()))
        );
        assert_eq!(
            parse_command("b 0 one\\ntwo").unwrap(),
            Some(SessionCommand::Body(0, "one\ntwo".into()))
        );
        assert_eq!(
            parse_command("rm 1").unwrap(),
            Some(SessionCommand::Remove(1))
        );
        assert_eq!(
            parse_command("t 3").unwrap(),
            Some(SessionCommand::Toggle(3))
        );
        assert_eq!(parse_command("quit").unwrap(), Some(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_accepts_tab_after_block_number() {
        assert_eq!(
            parse_command("h 0\tTitle").unwrap(),
            Some(SessionCommand::Heading(0, "Title".into()))
        );
        assert_eq!(
            parse_command("b\t1\tline one\\nline two").unwrap(),
            Some(SessionCommand::Body(1, "line one\nline two".into()))
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_command("rm").unwrap_err();
        assert_eq!(err.to_string(), "'rm' needs a block number");
        let err = parse_command("h x title").unwrap_err();
        assert_eq!(err.to_string(), "'h' needs a block number");
        let err = parse_command("dance").unwrap_err();
        assert!(err.to_string().contains("Unknown command 'dance'"));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a\\nb"), "a\nb");
        assert_eq!(unescape("back\\\\slash"), "back\\slash");
        assert_eq!(unescape("keep\\t"), "keep\\t");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[tokio::test]
    async fn test_session_edits_and_quit_saves() {
        let (mut notebook, recorder) = notebook(vec![Block::new("Todo", "milk")]);
        let input = &b"add Ideas\nb 1 first\\nsecond\nh 0 Shopping\nquit\nadd ignored\n"[..];
        let mut out = Vec::new();

        run_session(&mut notebook, input, &mut out).await.unwrap();
        let status = notebook.close().await;

        assert!(matches!(status, SaveStatus::Saved { .. }));
        let saves = recorder.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(
            saves[0],
            vec![
                Block::new("Shopping", "milk"),
                Block::new("Ideas", "first\nsecond"),
            ]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[0] Todo"));
        assert!(text.contains("Added block 1"));
    }

    #[tokio::test]
    async fn test_session_reports_bad_index_and_continues() {
        let (mut notebook, recorder) = notebook(vec![]);
        let input = &b"rm 4\nfrobnicate\nadd\n"[..];
        let mut out = Vec::new();

        run_session(&mut notebook, input, &mut out).await.unwrap();
        notebook.close().await;

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("out of range"));
        assert!(text.contains("Unknown command 'frobnicate'"));
        assert_eq!(recorder.saves(), vec![vec![Block::empty()]]);
    }

    #[tokio::test]
    async fn test_toggle_does_not_save() {
        let (mut notebook, recorder) = notebook(vec![Block::new("Todo", "milk")]);
        let input = &b"t 0\nshow\nt 0\n"[..];
        let mut out = Vec::new();

        run_session(&mut notebook, input, &mut out).await.unwrap();
        let status = notebook.close().await;

        assert_eq!(status, SaveStatus::Idle);
        assert!(recorder.saves().is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Block 0 collapsed"));
        assert!(text.contains("[0] Todo  (E)"));
        assert!(text.contains("Block 0 expanded"));
    }

    #[tokio::test]
    async fn test_save_command_flushes() {
        let (mut notebook, recorder) = notebook(vec![]);
        let mut out = Vec::new();

        let keep_going = apply_command(&mut notebook, SessionCommand::Add("x".into()), &mut out)
            .await
            .unwrap();
        assert!(keep_going);
        apply_command(&mut notebook, SessionCommand::Save, &mut out)
            .await
            .unwrap();

        assert_eq!(recorder.saves(), vec![vec![Block::new("x", "")]]);
        assert!(String::from_utf8(out).unwrap().contains("Saved just now"));
        notebook.close().await;
    }
}
