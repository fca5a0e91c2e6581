use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Read the whole input, from `path` when given, otherwise from stdin.
///
/// Stdin is only read when something is piped or redirected into it, so a
/// bare invocation fails fast instead of waiting on the terminal.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    read_source(path, stdin.lock(), interactive)
}

fn read_source(path: Option<&Path>, mut stdin: impl Read, interactive: bool) -> Result<Vec<u8>> {
    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "reading input file");
        return fs::read(path).with_context(|| format!("could not open file: {}", path.display()));
    }

    if interactive {
        bail!("nothing passed into stdin");
    }

    let mut buf = Vec::new();
    stdin
        .read_to_end(&mut buf)
        .context("could not read from input")?;
    tracing::debug!(bytes = buf.len(), "read input from stdin");
    Ok(buf)
}
