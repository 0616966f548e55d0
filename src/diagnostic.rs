//! Source-position helpers for error reporting
//!
//! Lexer and parser errors both point at a byte offset in the source buffer.
//! These helpers turn that offset into a 1-based [`SourceLocation`], recover the
//! text of the line it sits on, and draw the caret marker printed under it:
//!
//! ```text
//! int main(){return 2}
//! -------------------^
//! ```

use crate::parser::ast::SourceLocation;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use std::fmt;

/// Line and column (both 1-based) of `offset` in `source`.
///
/// Columns count characters, not bytes. Offsets past the end clamp to the end.
pub fn location_at(source: &str, offset: usize) -> SourceLocation {
    let offset = clamp_to_char_boundary(source, offset);
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = source[line_start..offset].chars().count() + 1;
    SourceLocation::new(line, column)
}

/// Text of the line containing `offset`, without its line terminator.
pub fn line_text(source: &str, offset: usize) -> &str {
    let offset = clamp_to_char_boundary(source, offset);
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    source[start..end].trim_end_matches('\r')
}

/// Dashes up to the column, then a caret under it.
pub fn caret_line(column: usize) -> String {
    format!("{}^", "-".repeat(column.saturating_sub(1)))
}

fn clamp_to_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Write the offending source line and its caret marker.
pub(crate) fn write_snippet(
    f: &mut fmt::Formatter<'_>,
    line_text: &str,
    location: SourceLocation,
) -> fmt::Result {
    write!(f, "\n{}\n{}", line_text, caret_line(location.column))
}

/// Print an error to stderr, colouring the prefix when stderr is a terminal.
pub fn report(prefix: &str, error: &dyn fmt::Display) {
    if std::io::stderr().is_tty() {
        eprintln!("{} {}", format!("{}:", prefix).red().bold(), error);
    } else {
        eprintln!("{}: {}", prefix, error);
    }
}
