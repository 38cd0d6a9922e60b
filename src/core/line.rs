//! Line assembly
//!
//! `<timestamp> [<severity>] <function>:(<filename>:<line>): <message>\n`

use super::severity::Severity;
use crate::callsite::CallSite;
use std::fmt::{self, Write};

/// Typical line length; the buffer grows past it as needed.
const LINE_CAPACITY: usize = 128;

/// Render one complete log line.
///
/// A newline is appended unless the message already ends with one, so a
/// message of `"done\n"` does not produce a blank line.
pub fn render_line(
    timestamp: &str,
    severity: Severity,
    site: &CallSite,
    args: fmt::Arguments<'_>,
) -> Vec<u8> {
    let mut line = String::with_capacity(LINE_CAPACITY);

    // Only a user Display impl can make these fail; whatever was rendered
    // up to that point is kept.
    let _ = write!(
        line,
        "{} [{}] {}:({}:{}): ",
        timestamp,
        severity.label(),
        site.function,
        site.filename,
        site.line
    );
    let _ = line.write_fmt(args);

    if !line.ends_with('\n') {
        line.push('\n');
    }
    line.into_bytes()
}
