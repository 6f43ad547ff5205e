use crate::models::Highlight;
use regex_lite::Regex;
use std::sync::LazyLock;

/// Line separating individual clippings in "My Clippings.txt".
pub const SEPARATOR: &str = "==========";

// Firmware revisions disagree on the casing of "page"/"location", and on how
// the metadata segments are ordered, so each field is searched for
// independently instead of splitting the line positionally.
static PAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)page (\d+)").expect("page pattern compiles"));

static LOC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)location (\d+-\d+|\d+)").expect("location pattern compiles"));

/// Day, spelled-out month, four-digit year, 24-hour clock. The whole match is
/// kept verbatim; it is never parsed into a calendar type.
static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2} \D+\d{4} \d{2}:\d{2}:\d{2}").expect("timestamp pattern compiles")
});

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    TruncatedBlock(String),
    MissingAuthor(String),
    MissingLocation(String),
    MissingTimestamp(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::TruncatedBlock(first) => {
                write!(f, "Clipping block starting at '{}' is too short", first)
            }
            ParseError::MissingAuthor(line) => {
                write!(f, "Title line has no '(Author)' part: '{}'", line)
            }
            ParseError::MissingLocation(line) => {
                write!(f, "No location found in metadata line: '{}'", line)
            }
            ParseError::MissingTimestamp(line) => {
                write!(f, "No timestamp found in metadata line: '{}'", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// All indices at which `target` occurs in `items`, ascending.
pub fn find<T, U>(items: &[T], target: &U) -> Vec<usize>
where
    T: PartialEq<U>,
    U: ?Sized,
{
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| *item == target)
        .map(|(i, _)| i)
        .collect()
}

/// Split lines into the blocks between successive separator lines.
///
/// A virtual separator is assumed before the first line, so content ahead of
/// the first real separator forms a block. Content after a trailing separator
/// is not closed by another separator and produces no block.
pub fn split_blocks<'a>(lines: &'a [String], separator: &str) -> Vec<&'a [String]> {
    let separators = find(lines, separator);
    let mut blocks = Vec::with_capacity(separators.len());

    let mut start = 0;
    for &sep in &separators {
        blocks.push(&lines[start..sep]);
        start = sep + 1;
    }

    blocks
}

/// Parse one clipping block: title line, metadata line, then the highlighted
/// text (blank padding lines dropped, remaining lines preserved in order).
pub fn parse_block(block: &[String]) -> Result<Highlight, ParseError> {
    if block.len() < 2 {
        let first = block.first().cloned().unwrap_or_default();
        return Err(ParseError::TruncatedBlock(first));
    }

    let title_line = &block[0];
    let metadata = &block[1];

    let open = title_line
        .find('(')
        .ok_or_else(|| ParseError::MissingAuthor(title_line.clone()))?;
    let title = title_line[..open].trim_end().to_string();
    // Everything after '(' minus the closing ')'.
    let mut author_chars = title_line[open + 1..].chars();
    author_chars.next_back();
    let author = author_chars.as_str().to_string();

    let page = PAGE_PATTERN
        .captures(metadata)
        .map(|caps| caps[1].to_string());

    let loc = LOC_PATTERN
        .captures(metadata)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ParseError::MissingLocation(metadata.clone()))?;

    let timestamp = TIMESTAMP_PATTERN
        .find(metadata)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::MissingTimestamp(metadata.clone()))?;

    let text = block[2..]
        .iter()
        .map(|line| line.as_str())
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Highlight {
        author,
        title,
        text,
        timestamp,
        loc,
        page,
    })
}

/// Parse all clipping blocks in the given lines.
///
/// Lenient policy: a malformed block yields a `ParseError` instead of a
/// half-filled record, and parsing continues with the remaining blocks.
/// Blocks with no non-blank content (e.g. doubled separators) are ignored.
pub fn parse_highlights(lines: &[String], separator: &str) -> (Vec<Highlight>, Vec<ParseError>) {
    let mut highlights = Vec::new();
    let mut errors = Vec::new();

    for block in split_blocks(lines, separator) {
        if block.iter().all(|line| line.trim().is_empty()) {
            continue;
        }
        match parse_block(block) {
            Ok(highlight) => highlights.push(highlight),
            Err(e) => errors.push(e),
        }
    }

    (highlights, errors)
}
