//! Locating and patching the managed region of an index document.
//!
//! A managed region is found in one of two ways:
//!
//! - **Markers**: everything from `%% INDEX STARTS HERE %%` through
//!   `%% INDEX ENDS HERE %%`, which wraps a `## Contents` heading and the listing.
//! - **Heading**: a `## Contents` heading line through the next heading of any
//!   level, or the end of the document.
//!
//! Markers are looked for first, then the heading, whichever [`RegionFormat`] is
//! configured, so documents written under one format are updated in place under
//! the other. The configured format only decides what gets written, and markers
//! are kept when a heading region would run on into text after them.
//!
//! An end marker pairs with the closest start marker before it. Unpaired markers
//! mean "no region": the patcher appends a fresh region instead of failing, and
//! never truncates.

use serde::{Deserialize, Serialize};

/// Opening sentinel line.
pub const START_MARKER: &str = "%% INDEX STARTS HERE %%";
/// Closing sentinel line.
pub const END_MARKER: &str = "%% INDEX ENDS HERE %%";
/// Heading that introduces the listing.
pub const CONTENTS_HEADING: &str = "## Contents";

/// How a freshly written region is delimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionFormat {
    /// Explicit start/end sentinel lines around the heading and listing
    #[default]
    Markers,
    /// Only the `## Contents` heading; the region runs to the next heading
    Heading,
}

/// Byte offsets of a located region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    kind: RegionFormat,
    /// First byte of the region (marker or heading line)
    start: usize,
    body_start: usize,
    body_end: usize,
    /// One past the last byte of the region
    end: usize,
}

/// The first end marker that has a start marker before it, paired with the
/// closest such start marker. Stray markers around the region are skipped.
fn find_marker_span(text: &str) -> Option<Span> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(END_MARKER) {
        let end_marker = search_from + offset;
        if let Some(start) = text[..end_marker].rfind(START_MARKER) {
            return Some(Span {
                kind: RegionFormat::Markers,
                start,
                body_start: start + START_MARKER.len(),
                body_end: end_marker,
                end: end_marker + END_MARKER.len(),
            });
        }
        search_from = end_marker + END_MARKER.len();
    }
    None
}

/// Lines of `text` with their byte offsets, newline included.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// ATX heading of any level: one to six `#` followed by whitespace or end of line.
fn is_heading_line(line: &str) -> bool {
    let line = line.trim_end();
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    (1..=6).contains(&hashes)
        && line[hashes..]
            .chars()
            .next()
            .is_none_or(|c| c == ' ' || c == '\t')
}

fn is_contents_heading(line: &str) -> bool {
    line.trim_end() == CONTENTS_HEADING
}

fn find_heading_span(text: &str) -> Option<Span> {
    let (start, heading) = lines_with_offsets(text).find(|(_, line)| is_contents_heading(line))?;
    let body_start = start + heading.len();
    let body_end = lines_with_offsets(&text[body_start..])
        .find(|(_, line)| is_heading_line(line))
        .map(|(offset, _)| body_start + offset)
        .unwrap_or(text.len());

    Some(Span {
        kind: RegionFormat::Heading,
        start,
        body_start,
        body_end,
        end: body_end,
    })
}

fn locate(text: &str) -> Option<Span> {
    find_marker_span(text).or_else(|| find_heading_span(text))
}

/// Whether the document already carries a managed region.
pub fn has_region(text: &str) -> bool {
    locate(text).is_some()
}

/// The trimmed listing inside the managed region, or `None` if there is no region.
pub fn extract(text: &str) -> Option<String> {
    let span = locate(text)?;
    let body = text[span.body_start..span.body_end].trim();

    let body = match span.kind {
        RegionFormat::Markers => match body.strip_prefix(CONTENTS_HEADING) {
            Some(rest) if rest.is_empty() || rest.starts_with(['\n', '\r']) => rest.trim(),
            _ => body,
        },
        RegionFormat::Heading => body,
    };

    Some(body.to_string())
}

/// The full region text for `content` in the given format.
pub fn format_region(content: &str, format: RegionFormat) -> String {
    match format {
        RegionFormat::Markers => format!(
            "{}\n{}\n\n{}\n{}",
            START_MARKER,
            CONTENTS_HEADING,
            content.trim(),
            END_MARKER
        ),
        RegionFormat::Heading => format!("{}\n\n{}\n", CONTENTS_HEADING, content.trim()),
    }
}

/// Whether a heading region can stand in for a markers region.
///
/// A heading region has no closing line: it must start a line, be the first
/// `## Contents` heading, and be followed only by a heading or the end of the
/// document.
fn heading_fits(before: &str, rest: &str) -> bool {
    let starts_line = before.is_empty() || before.ends_with('\n');
    starts_line
        && !lines_with_offsets(before).any(|(_, line)| is_contents_heading(line))
        && rest.lines().next().is_none_or(is_heading_line)
}

/// Replace the managed region of `text` with `content`, or append a region if
/// the document has none.
///
/// Text outside the region is preserved verbatim. Applying the same content
/// twice yields the same document.
pub fn merge(text: &str, content: &str, format: RegionFormat) -> String {
    let Some(span) = locate(text) else {
        let region = format_region(content, format);
        let mut out = if text.trim().is_empty() {
            region
        } else {
            format!("{}\n\n{}", text.trim_end(), region)
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        return out;
    };

    let before = &text[..span.start];
    let after = &text[span.end..];
    let rest = after.trim_start();

    let format = if span.kind == RegionFormat::Markers && !heading_fits(before, rest) {
        RegionFormat::Markers
    } else {
        format
    };
    let region = format_region(content, format);

    let mut out = String::with_capacity(text.len() + region.len());
    out.push_str(before);
    out.push_str(&region);
    match (span.kind, format) {
        (_, RegionFormat::Heading) => {
            // Region ends with a newline; keep one blank line before the next heading
            if !rest.is_empty() {
                out.push('\n');
                out.push_str(rest);
            }
        }
        (RegionFormat::Heading, RegionFormat::Markers) => {
            if after.is_empty() {
                out.push('\n');
            } else {
                out.push_str("\n\n");
                out.push_str(after);
            }
        }
        (RegionFormat::Markers, RegionFormat::Markers) => out.push_str(after),
    }
    out
}
