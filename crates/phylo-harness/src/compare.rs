//! Line-ending insensitive file comparison
//!
//! Output written on one platform must compare equal to reference files
//! written on another, so `\r\n` and `\n` line endings are interchangeable.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Whether two files hold the same lines, ignoring line endings.
///
/// Lines are read in lock-step; trailing `\r` and `\n` bytes are stripped
/// from each before comparing. The files are equivalent only if every pair
/// matches and both end on the same line, so an empty file only matches
/// another empty file. Failing to open or read either file is an error,
/// never a `false`.
pub fn files_equivalent(first: impl AsRef<Path>, second: impl AsRef<Path>) -> io::Result<bool> {
    let first = BufReader::new(File::open(first)?);
    let second = BufReader::new(File::open(second)?);
    readers_equivalent(first, second)
}

/// Same as [`files_equivalent`], over any buffered readers.
pub fn readers_equivalent<A: BufRead, B: BufRead>(mut first: A, mut second: B) -> io::Result<bool> {
    let mut line_a = Vec::new();
    let mut line_b = Vec::new();

    loop {
        line_a.clear();
        line_b.clear();
        let read_a = first.read_until(b'\n', &mut line_a)?;
        let read_b = second.read_until(b'\n', &mut line_b)?;

        match (read_a, read_b) {
            (0, 0) => return Ok(true),
            (0, _) | (_, 0) => return Ok(false),
            _ => {}
        }
        if strip_line_ending(&line_a) != strip_line_ending(&line_b) {
            return Ok(false);
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !matches!(b, b'\r' | b'\n'))
        .map_or(0, |i| i + 1);
    &line[..end]
}
