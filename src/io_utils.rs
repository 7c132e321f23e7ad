//! Line acquisition for inference.
//!
//! Inputs are plain text files or `-` for stdin. UTF-8 input is streamed line
//! by line so only the lines needed for sampling are read; other encodings are
//! decoded in full through `encoding_rs` first.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

const UTF8_BOM: char = '\u{feff}';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_dash(path) {
        Ok(Box::new(BufReader::new(io::stdin().lock())))
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Reads at most `limit` lines (all lines when `None`) from `reader`.
pub fn read_lines_from<R: Read>(
    reader: R,
    encoding: &'static Encoding,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut lines = Vec::new();

    if encoding == UTF_8 {
        let mut reader = BufReader::new(reader);
        while lines.len() < limit {
            let mut line = String::new();
            if reader.read_line(&mut line).context("Reading input line")? == 0 {
                break;
            }
            strip_line_ending(&mut line);
            lines.push(line);
        }
    } else {
        let mut bytes = Vec::new();
        BufReader::new(reader)
            .read_to_end(&mut bytes)
            .context("Reading input")?;
        let text = decode_bytes(&bytes, encoding)?;
        lines.extend(
            text.lines()
                .take(limit)
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string()),
        );
    }

    if let Some(first) = lines.first_mut() {
        if first.starts_with(UTF8_BOM) {
            first.remove(0);
        }
    }
    Ok(lines)
}

/// Reads lines from `path`, or stdin when `path` is `-`.
pub fn read_lines(
    path: &Path,
    encoding: &'static Encoding,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    let reader = open_input(path)?;
    read_lines_from(reader, encoding, limit)
        .with_context(|| format!("Reading lines from {path:?}"))
}
