//! Copying text to the system clipboard through the platform's own tool.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{CalculenderError, CalculenderResult};

/// Tools tried in order, with the arguments that make them read stdin
/// into the clipboard.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
    ("clip", &[]),
];

fn find_tool() -> CalculenderResult<(PathBuf, &'static [&'static str])> {
    CLIPBOARD_TOOLS
        .iter()
        .find_map(|(name, args)| which::which(name).ok().map(|path| (path, *args)))
        .ok_or_else(|| {
            let names: Vec<&str> = CLIPBOARD_TOOLS.iter().map(|(name, _)| *name).collect();
            CalculenderError::Clipboard(format!(
                "No clipboard tool found in PATH (tried {})",
                names.join(", ")
            ))
        })
}

pub async fn copy_to_clipboard(text: &str) -> CalculenderResult<()> {
    let (tool, args) = find_tool()?;
    debug!(tool = %tool.display(), "copying to clipboard");

    let mut child = Command::new(&tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            CalculenderError::Clipboard(format!("Failed to spawn {}: {}", tool.display(), e))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        // Dropping stdin closes the pipe so the tool sees EOF.
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(CalculenderError::Clipboard(format!(
            "{} exited with status: {}",
            tool.display(),
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}
