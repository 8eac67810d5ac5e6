//! Command implementations.

use std::borrow::Cow;
use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use readease_core::RuleTable;

pub mod info;
pub mod rules;
pub mod score;
pub mod syllables;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read all of `reader`, failing once more than `max_bytes` arrive.
pub fn read_input_stream<R: Read>(
    mut reader: R,
    max_bytes: Option<usize>,
) -> anyhow::Result<String> {
    let mut content = String::new();
    match max_bytes {
        Some(max) => {
            reader
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            if content.len() > max {
                anyhow::bail!("input too large: standard input exceeds {max} bytes");
            }
        }
        None => {
            reader
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
        }
    }
    Ok(content)
}

/// Check inline text against the configured limit.
pub fn check_input_len(text: &str, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && text.len() > max
    {
        anyhow::bail!(
            "input too large: text is {} bytes (limit: {max} bytes)",
            text.len()
        );
    }
    Ok(())
}

/// Pick the rule table: the command flag, then config, then the built-in table.
pub fn resolve_rules(
    flag: Option<&Utf8Path>,
    configured: Option<&Utf8Path>,
) -> anyhow::Result<Cow<'static, RuleTable>> {
    match flag.or(configured) {
        Some(path) => {
            let table = RuleTable::load(path)
                .with_context(|| format!("failed to load rule table {path}"))?;
            tracing::debug!(%path, "using rule table file");
            Ok(Cow::Owned(table))
        }
        None => Ok(Cow::Borrowed(RuleTable::builtin())),
    }
}
