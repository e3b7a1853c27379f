//! In-place header correction for `-w`.

use std::path::Path;

use crate::error::HeaderError;
use crate::head::TRAILING;
use crate::parser::{COPYRIGHT_MARKER, LICENSE_MARKER};
use crate::types::Consensus;

/// Return `content` with its copyright and license lines set to the consensus.
///
/// Existing lines inside the first `header_lines` lines are replaced where
/// they are. A single missing line is placed next to the one that exists.
/// When both are missing they are inserted at the top, below a `#!` line if
/// there is one, followed by a blank line. Line endings follow the file.
///
/// If the window is too small to hold both lines below a `#!` line the
/// content is returned unchanged.
pub fn fix_header(
    content: &[u8],
    prefix: &str,
    consensus: &Consensus,
    header_lines: usize,
) -> Vec<u8> {
    let mut lines: Vec<Vec<u8>> = content
        .split_inclusive(|b| *b == b'\n')
        .map(<[u8]>::to_vec)
        .collect();
    let nl: &[u8] = if lines.first().is_some_and(|l| l.ends_with(b"\r\n")) {
        b"\r\n"
    } else {
        b"\n"
    };

    let copyright_start = format!("{prefix} {COPYRIGHT_MARKER}");
    let license_start = format!("{prefix} {LICENSE_MARKER}");
    let top = usize::from(lines.first().is_some_and(|l| l.starts_with(b"#!")));
    if top + 2 > header_lines {
        return content.to_vec();
    }

    let window = header_lines.min(lines.len());
    let find = |start: &str| {
        lines[..window].iter().position(|l| {
            String::from_utf8_lossy(l)
                .trim_end_matches(TRAILING)
                .starts_with(start)
        })
    };
    let copyright_at = find(&copyright_start);
    let license_at = find(&license_start);

    let copyright_line = header_line(prefix, &consensus.copyright, nl);
    let license_line = header_line(prefix, &consensus.license, nl);

    match (copyright_at, license_at) {
        (Some(c), Some(l)) => {
            lines[c] = copyright_line;
            lines[l] = license_line;
        }
        (Some(at), None) | (None, Some(at)) => {
            let pair = [copyright_line, license_line];
            if at + 1 < header_lines {
                lines.splice(at..=at, pair);
            } else {
                lines.remove(at);
                insert_lines(&mut lines, top, pair);
            }
        }
        (None, None) => {
            insert_lines(&mut lines, top, [copyright_line, license_line, nl.to_vec()]);
        }
    }

    lines.concat()
}

fn header_line(prefix: &str, value: &str, nl: &[u8]) -> Vec<u8> {
    let mut line = format!("{prefix} {value}").into_bytes();
    line.extend_from_slice(nl);
    line
}

fn insert_lines<const N: usize>(lines: &mut Vec<Vec<u8>>, at: usize, new: [Vec<u8>; N]) {
    let at = at.min(lines.len());
    if let Some(prev) = at.checked_sub(1).and_then(|i| lines.get_mut(i)) {
        if !prev.ends_with(b"\n") {
            prev.push(b'\n');
        }
    }
    lines.splice(at..at, new);
}

/// Rewrite the file at `path` in place. Returns whether its bytes changed.
pub fn fix_file(
    path: &Path,
    prefix: &str,
    consensus: &Consensus,
    header_lines: usize,
) -> Result<bool, HeaderError> {
    let content = std::fs::read(path).map_err(|e| HeaderError::io(path, e))?;
    let fixed = fix_header(&content, prefix, consensus, header_lines);
    if fixed == content {
        return Ok(false);
    }
    std::fs::write(path, &fixed).map_err(|e| HeaderError::io(path, e))?;
    Ok(true)
}
