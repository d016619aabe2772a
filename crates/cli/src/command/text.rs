use crate::print_json;
use crate::wiring::App;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum TextAction {
    /// Create an empty document if none exists
    Init,

    /// Replace the document content
    Write(ContentArgs),

    /// Add text directly after the current content
    Append(ContentArgs),

    /// Print the document content
    Read,

    /// Empty the document but keep the file
    Clear,

    /// Remove the document
    Delete,

    /// Size, character, word, line and chunk counts
    Stats,

    /// Overlapping chunks prepared for embedding
    Chunks,

    /// Soft checks on the content length
    Validate,

    /// Absolute path of the document
    Path,
}

#[derive(clap::Args)]
pub(crate) struct ContentArgs {
    /// Inline text (reads stdin when neither this nor --file is given)
    #[arg(conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl ContentArgs {
    fn resolve(self) -> Result<String> {
        if let Some(text) = self.text {
            return Ok(text);
        }
        if let Some(path) = self.file {
            return std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read text from stdin")?;
        Ok(buf)
    }
}

#[derive(Serialize)]
struct MutationOutput {
    action: &'static str,
    ok: bool,
    path: String,
    size_bytes: u64,
}

#[derive(Serialize)]
struct ReadOutput {
    exists: bool,
    has_content: bool,
    content: String,
}

#[derive(Serialize)]
struct ChunksOutput {
    count: usize,
    chunks: Vec<String>,
}

#[derive(Serialize)]
struct PathOutput {
    path: String,
}

pub(crate) async fn run(app: &App, action: TextAction) -> Result<()> {
    let manager = app.text_manager()?;

    let (name, ok) = match action {
        TextAction::Init => ("init", manager.create_or_load_profile_file().await),
        TextAction::Write(args) => ("write", manager.write_profile(&args.resolve()?).await),
        TextAction::Append(args) => ("append", manager.append_profile(&args.resolve()?).await),
        TextAction::Clear => ("clear", manager.clear_profile().await),
        TextAction::Delete => ("delete", manager.delete_profile().await),
        TextAction::Read => {
            return print_json(&ReadOutput {
                exists: manager.profile_exists().await,
                has_content: manager.has_content().await,
                content: manager.read_profile().await,
            });
        }
        TextAction::Stats => return print_json(&manager.get_profile_stats().await),
        TextAction::Chunks => {
            let chunks = manager.get_chunks_for_embedding().await;
            return print_json(&ChunksOutput {
                count: chunks.len(),
                chunks,
            });
        }
        TextAction::Validate => return print_json(&manager.validate_profile().await),
        TextAction::Path => {
            return print_json(&PathOutput {
                path: manager.get_file_path().display().to_string(),
            });
        }
    };

    print_json(&MutationOutput {
        action: name,
        ok,
        path: manager.get_file_path().display().to_string(),
        size_bytes: manager.get_file_size().await,
    })?;
    if !ok {
        bail!("text {name} failed for {}", manager.get_file_path().display());
    }
    Ok(())
}
