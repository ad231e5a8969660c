//! AutoProxy rule line classifier.
//!
//! A rule line is reduced to a single matchable item in stages:
//!
//! ```text
//! |http://www.example.com:8080/path  -> header    (start = 1)
//! http://www.example.com:8080/path   -> host      www.example.com:8080
//! www.example.com:8080               -> port      www.example.com
//! www.example.com                    -> suffix    example.com (domain_suffix)
//! ```
//!
//! IP literals short-circuit before suffix reduction, and any wildcard in
//! the host turns the rule into a keyword rule.

use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LineError;
use crate::{Item, ItemType};

/// Runs of slashes separating scheme, host and path.
static PATH_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").unwrap());

/// Outcome of classifying a line that is not malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The line yields a matchable item
    Item(Item),
    /// Whitelist (`@@`), comment (`!`) or negation (`~`) line
    Skip,
}

impl Classification {
    /// Get the item, if any.
    pub fn item(&self) -> Option<&Item> {
        match self {
            Classification::Item(item) => Some(item),
            Classification::Skip => None,
        }
    }

    /// Consume into the item, if any.
    pub fn into_item(self) -> Option<Item> {
        match self {
            Classification::Item(item) => Some(item),
            Classification::Skip => None,
        }
    }
}

/// Working state after header inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    /// Byte offset where the rule body starts
    start: usize,
    /// Type assumed until suffix reduction or keyword extraction decides otherwise
    item_type: ItemType,
}

/// Working state carried from the host value into the final item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    item_type: ItemType,
    value: &'a str,
}

/// Classify one rule line.
///
/// The line is trimmed first. Malformed lines return a [`LineError`];
/// whitelist and comment lines return [`Classification::Skip`].
pub fn classify(line: &str) -> Result<Classification, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(LineError::EmptyLine);
    }
    if !has_word_character(line) {
        return Err(LineError::NotEnoughCharacter(line.to_string()));
    }

    let header = match inspect_header(line)? {
        Some(header) => header,
        None => return Ok(Classification::Skip),
    };

    let host = host_segment(&line[header.start..]);
    let value = strip_port(host);
    if value.is_empty() {
        return Err(LineError::EmptyValue(line.to_string()));
    }

    if is_ip_literal(value) {
        return Ok(Classification::Item(Item::new(ItemType::Ip, value)));
    }

    let candidate = reduce_suffix(Candidate {
        item_type: header.item_type,
        value,
    });

    if let Some(keyword) = extract_keyword(value) {
        return Ok(Classification::Item(Item::new(
            ItemType::DomainKeyword,
            keyword,
        )));
    }

    // Wildcards with no token between them leave nothing to match on.
    if candidate.value.is_empty() || value.contains('*') {
        return Err(LineError::EmptyValue(line.to_string()));
    }
    Ok(Classification::Item(Item::new(
        candidate.item_type,
        candidate.value,
    )))
}

/// ASCII word character check, `[0-9A-Za-z_]`.
fn has_word_character(line: &str) -> bool {
    line.bytes().any(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Inspect the first character of a trimmed, non-empty line.
///
/// Returns `Ok(None)` for lines that must be skipped.
fn inspect_header(line: &str) -> Result<Option<Header>, LineError> {
    let mut chars = line.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Err(LineError::EmptyLine),
    };

    let mut header = Header {
        start: 1,
        item_type: ItemType::DomainKeyword,
    };

    if first.is_alphanumeric() || first == '*' {
        header.start = 0;
        return Ok(Some(header));
    }

    match first {
        '@' | '!' | '~' => return Ok(None),
        '.' => {}
        '|' => {
            if chars.next() == Some('|') {
                header.start = 2;
                header.item_type = ItemType::DomainSuffix;
            }
        }
        _ => return Err(LineError::Unsupported(line.to_string())),
    }

    Ok(Some(header))
}

/// Pick the host-bearing segment out of a rule body.
///
/// `http://abc.com/def/gh` splits into `http:`, `abc.com`, `def/gh`; the
/// scheme segment is dropped when there is something after it.
fn host_segment(body: &str) -> &str {
    let segments: Vec<&str> = PATH_SEPARATOR.splitn(body, 3).collect();
    match segments.as_slice() {
        [scheme, host, ..] if scheme.contains(':') => *host,
        [first, ..] => *first,
        [] => body,
    }
}

/// Drop `:port` (or a `user:` prefix) from a host segment.
fn strip_port(segment: &str) -> &str {
    match segment.split_once(':') {
        Some((host, _)) => host,
        None => segment,
    }
}

fn is_ip_literal(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

/// Reduce a dotted value to its last two labels.
///
/// `abc.def.gh.jkl.com` becomes `jkl.com` typed as a domain suffix. Values
/// without a dot keep their value and type.
fn reduce_suffix(candidate: Candidate<'_>) -> Candidate<'_> {
    let value = candidate.value;
    if !value.contains('.') {
        return candidate;
    }

    // Everything after the second-to-last dot: the last two "label." segments.
    let reduced = match value.rmatch_indices('.').nth(1) {
        Some((idx, _)) => &value[idx + 1..],
        None => value,
    };

    Candidate {
        item_type: ItemType::DomainSuffix,
        value: reduced.trim_start_matches('.'),
    }
}

/// Extract the longest token from a wildcard value.
///
/// `abc.def*gh*jklabc.com` yields `jklabc`. On ties the first longest token
/// wins. Returns `None` when the value has no wildcard or no token.
fn extract_keyword(value: &str) -> Option<&str> {
    if !value.contains('*') {
        return None;
    }

    let mut keyword: Option<&str> = None;
    let mut max_len = 0;
    for token in value.split(|c| c == '*' || c == '.') {
        if token.len() > max_len {
            max_len = token.len();
            keyword = Some(token);
        }
    }
    keyword
}
