//! Command-line front end
//!
//! Supports:
//! - Rendering, checking and redacting note text from a file or stdin
//! - Formatting and parsing timestamps
//! - Managing stored notes (list, show, stamp, clear, delete)

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::NotesConfig;
use crate::host::{note_key, FixedVideo, MemoryClipboard, NoteStore, StampCatalog};
use crate::keymap::{load_default_keymap, Action, Keymap};
use crate::messages::{Msg, SessionMsg};
use crate::redact::redact;
use crate::render::{render, to_html, HtmlOptions, RenderNode};
use crate::runtime::{App, Services};
use crate::shadowban::is_banned;
use crate::stamps::StampMap;
use crate::store::{JsonFileCatalog, JsonFileStore, NoteEntry};
use crate::{config_paths, timecode, video_id};

/// Time-coded video notes
#[derive(Parser, Debug)]
#[command(name = "stampnote", version, about = "Time-coded video notes")]
pub struct CliArgs {
    /// Use DIR instead of the user config directory
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rendered tree of a note
    Render {
        /// Note file (stdin when omitted)
        file: Option<PathBuf>,
        /// Print HTML markup instead of the tree
        #[arg(long)]
        html: bool,
    },
    /// List timestamps and flag shadow-ban risks (exit status 1 if any)
    Check { file: Option<PathBuf> },
    /// Redact NG words
    Redact {
        file: Option<PathBuf>,
        /// Word to redact (repeatable); defaults to the configured NG words
        #[arg(long = "word", value_name = "W")]
        words: Vec<String>,
    },
    /// Format seconds as a timestamp
    Format {
        seconds: u64,
        /// Always include the hours part
        #[arg(long)]
        hours: bool,
    },
    /// Parse a timestamp into seconds
    Parse { token: String },
    /// Manage stored notes
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// List notes, most recently updated first
    List,
    /// Print a note
    Show {
        /// Video URL or id
        video: String,
    },
    /// Add a timestamp to a note
    Stamp { video: String, seconds: u64 },
    /// Empty a note
    Clear { video: String },
    /// Remove a note
    Delete { video: String },
}

/// Files used by the CLI
#[derive(Debug, Clone)]
struct Paths {
    config: PathBuf,
    shortcuts: PathBuf,
    notes: PathBuf,
    stamps: PathBuf,
}

impl Paths {
    fn in_dir(dir: &Path) -> Self {
        Self {
            config: dir.join("config.yaml"),
            shortcuts: dir.join("shortcuts.yaml"),
            notes: dir.join("notes.json"),
            stamps: dir.join("stamps.json"),
        }
    }

    fn resolve(config_dir: Option<&Path>) -> Result<Self> {
        match config_dir {
            Some(dir) => Ok(Self::in_dir(dir)),
            None => config_paths::config_dir()
                .map(|dir| Self::in_dir(&dir))
                .context("No config directory available"),
        }
    }
}

/// Run a parsed command. Returns the process exit status.
pub fn run(args: CliArgs, input: &mut dyn Read, out: &mut dyn Write) -> Result<u8> {
    let paths = Paths::resolve(args.config_dir.as_deref())?;
    let config = NotesConfig::load_from(&paths.config);

    match args.command {
        Command::Render { file, html } => {
            let text = read_input(file.as_deref(), input)?;
            let stamps = load_stamps(&paths);
            let tree = render(&text, &stamps);
            if html {
                writeln!(out, "{}", to_html(&tree, &HtmlOptions::default()))?;
            } else {
                describe(&tree, 0, out)?;
            }
        }

        Command::Check { file } => {
            let text = read_input(file.as_deref(), input)?;
            let tree = render(&text, &StampMap::new());
            let mut any_banned = false;
            for (_, token) in tree.timestamps() {
                if is_banned(token) {
                    any_banned = true;
                    writeln!(out, "{}\tbanned", token)?;
                } else {
                    writeln!(out, "{}", token)?;
                }
            }
            if any_banned {
                return Ok(1);
            }
        }

        Command::Redact { file, words } => {
            let text = read_input(file.as_deref(), input)?;
            let words = if words.is_empty() {
                config.ng_words.clone()
            } else {
                words
            };
            write!(out, "{}", redact(&text, &words))?;
        }

        Command::Format { seconds, hours } => {
            writeln!(out, "{}", timecode::format(seconds, hours))?;
        }

        Command::Parse { token } => {
            writeln!(out, "{}", timecode::parse(&token))?;
        }

        Command::Notes { command } => run_notes(command, &paths, config, out)?,
    }

    Ok(0)
}

fn run_notes(
    command: NotesCommand,
    paths: &Paths,
    config: NotesConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let mut store = JsonFileStore::open(&paths.notes)
        .with_context(|| format!("Failed to open {}", paths.notes.display()))?;

    match command {
        NotesCommand::List => {
            for (key, note) in store.list()? {
                let entry = NoteEntry { key, note };
                let id = entry.key.strip_prefix("video_").unwrap_or(&entry.key);
                let preview = entry.note.text.lines().next().unwrap_or_default();
                writeln!(out, "{}\t{}\t{}", id, entry.time_ago(), preview)?;
            }
        }

        NotesCommand::Show { video } => {
            let id = resolve_video(&video)?;
            match store.get(&note_key(&id))? {
                Some(note) => write!(out, "{}", note.text)?,
                None => bail!("No note for {}", id),
            }
        }

        NotesCommand::Stamp { video, seconds } => {
            let id = resolve_video(&video)?;
            let bindings = load_default_keymap(Some(paths.shortcuts.as_path()));
            let keymap = Keymap::with_bindings(bindings);
            let mut app = App::new(
                config,
                keymap,
                Services {
                    store: Box::new(store),
                    video: Box::new(FixedVideo::at(seconds)),
                    catalog: Box::new(JsonFileCatalog::new(&paths.stamps)),
                    clipboard: Box::new(MemoryClipboard::default()),
                },
            )
            .with_config_path(&paths.config);

            app.run(Msg::navigate(id));
            let consumed = app
                .keymap
                .shortcut_for(Action::AddTimestamp)
                .is_some_and(|shortcut| app.handle_key(&shortcut));
            if !consumed {
                app.run(Msg::add_timestamp(seconds));
            }
            app.run(Msg::Session(SessionMsg::Blur));
            write!(out, "{}", app.model.session.raw)?;
        }

        NotesCommand::Clear { video } => {
            let id = resolve_video(&video)?;
            store.set(&note_key(&id), "")?;
            tracing::info!("Cleared note for {}", id);
        }

        NotesCommand::Delete { video } => {
            let id = resolve_video(&video)?;
            if !store.delete(&note_key(&id))? {
                bail!("No note for {}", id);
            }
        }
    }

    Ok(())
}

fn resolve_video(input: &str) -> Result<String> {
    video_id::from_url_or_id(input).with_context(|| format!("No video id in {:?}", input))
}

fn read_input(file: Option<&Path>, input: &mut dyn Read) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            input.read_to_string(&mut text).context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn load_stamps(paths: &Paths) -> StampMap {
    match JsonFileCatalog::new(&paths.stamps).lookup() {
        Ok(sources) => StampMap::from_sources(&sources),
        Err(e) => {
            tracing::warn!("Stamp catalog unavailable: {}", e);
            StampMap::new()
        }
    }
}

/// Print one line per node, indented by depth
fn describe(node: &RenderNode, depth: usize, out: &mut dyn Write) -> Result<()> {
    let indent = "  ".repeat(depth);
    match node {
        RenderNode::TextRun(text) => writeln!(out, "{}text {:?}", indent, text)?,
        RenderNode::LineBreak => writeln!(out, "{}break", indent)?,
        RenderNode::TimestampToken(text) => writeln!(
            out,
            "{}timestamp {} ({}s)",
            indent,
            text,
            timecode::parse(text)
        )?,
        RenderNode::StampToken { name, url } => {
            writeln!(out, "{}stamp {} <{}>", indent, name, url)?
        }
        RenderNode::Container(children) => {
            writeln!(out, "{}container", indent)?;
            for child in children {
                describe(child, depth + 1, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str], stdin: &str) -> (u8, String) {
        let args = CliArgs::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let code = run(args, &mut stdin.as_bytes(), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_format_and_parse() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path().to_str().unwrap();
        assert_eq!(run_args(&["stampnote", "--config-dir", d, "format", "65"], "").1, "1:05\n");
        assert_eq!(
            run_args(&["stampnote", "--config-dir", d, "format", "65", "--hours"], "").1,
            "0:01:05\n"
        );
        assert_eq!(run_args(&["stampnote", "--config-dir", d, "parse", "1:02:05"], "").1, "3725\n");
    }

    #[test]
    fn test_check_flags_banned() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path().to_str().unwrap();
        let (code, out) = run_args(&["stampnote", "--config-dir", d, "check"], "a 1:05 b 1:10:05");
        assert_eq!(code, 1);
        assert_eq!(out, "1:05\n1:10:05\tbanned\n");

        let (code, _) = run_args(&["stampnote", "--config-dir", d, "check"], "a 1:05");
        assert_eq!(code, 0);
    }

    #[test]
    fn test_redact_with_words() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path().to_str().unwrap();
        let (_, out) = run_args(
            &["stampnote", "--config-dir", d, "redact", "--word", "boss"],
            "the BOSS fight",
        );
        assert_eq!(out, "the 〇 fight");
    }

    #[test]
    fn test_render_tree() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path().to_str().unwrap();
        let (_, out) = run_args(&["stampnote", "--config-dir", d, "render"], "hi 1:05\nok");
        assert_eq!(
            out,
            "container\n  text \"hi \"\n  timestamp 1:05 (65s)\n  break\n  text \"ok\"\n"
        );
    }

    #[test]
    fn test_notes_stamp_show_delete() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path().to_str().unwrap();
        let url = "https://www.youtube.com/watch?v=abc123";

        let (_, out) = run_args(&["stampnote", "--config-dir", d, "notes", "stamp", url, "65"], "");
        let expected = format!("{}\n\n - 1:05  ", NotesConfig::default().default_text);
        assert_eq!(out, expected);

        let (_, shown) = run_args(&["stampnote", "--config-dir", d, "notes", "show", "abc123"], "");
        assert_eq!(shown, expected);

        let (_, listed) = run_args(&["stampnote", "--config-dir", d, "notes", "list"], "");
        assert!(listed.starts_with("abc123\tjust now\t"));

        run_args(&["stampnote", "--config-dir", d, "notes", "delete", "abc123"], "");
        let args = CliArgs::try_parse_from(["stampnote", "--config-dir", d, "notes", "show", "abc123"])
            .unwrap();
        assert!(run(args, &mut "".as_bytes(), &mut Vec::new()).is_err());
    }
}
