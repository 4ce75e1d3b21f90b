//! Input and output helpers shared by commands.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

/// Whether `path` stands for stdin/stdout.
#[inline]
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole document from `path`, or from stdin when `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if !is_stdio(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Write `text` to `path`, or to stdout when `None` or `-`.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) if !is_stdio(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Serialize `value` as JSON, one document per line.
pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// Format count with noun, e.g. `1 file`, `3 files`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
