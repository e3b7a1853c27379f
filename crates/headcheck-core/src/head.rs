use std::io::{self, BufRead};

/// Characters stripped from the end of every header line.
pub(crate) const TRAILING: &[char] = &[' ', '\t', '\r', '\n'];

/// Read at most `n` lines from `reader`.
///
/// Trailing whitespace and line terminators are stripped. A final line
/// without a newline is still returned. Reading stops as soon as `n` lines
/// have been collected, so large files are never read to the end.
pub fn read_head<R: BufRead>(mut reader: R, n: usize) -> io::Result<Vec<String>> {
    let mut lines = Vec::with_capacity(n);
    let mut buf = Vec::new();
    while lines.len() < n {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        lines.push(line.trim_end_matches(TRAILING).to_string());
    }
    Ok(lines)
}
