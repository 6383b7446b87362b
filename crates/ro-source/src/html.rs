//! Table extraction from running-order HTML.
//!
//! This is a tag-block scanner, not a full HTML parser. It finds `<table>`
//! blocks, takes the first `<th>` as the table heading and turns every
//! `<tr>` with `<td>` cells into a [`RawRow`]:
//!
//! | cell | use |
//! |------|-----|
//! | 0 | time range; text fragments joined with the double-space separator |
//! | 1 | performer text |
//! | 1.. | performer link: the first `href`, from cell 1 or any later cell |
//!
//! The live page puts the detail-page anchor on the venue label in cell 2,
//! so later cells are searched when the performer cell has none.

use std::sync::LazyLock;

use regex::Regex;
use ro_core::RawRow;
use ro_core::row::TIME_RANGE_SEPARATOR;
use ro_core::types::normalize_whitespace;

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']*)["']"#).unwrap());

/// One `<table>` of the page, before a nominal date is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTable {
    /// Text of the first header cell; the venue name on running-order pages.
    pub heading: Option<String>,
    pub rows: Vec<RawRow>,
}

/// Extracts every table of `html` in document order.
pub fn extract_tables(html: &str) -> Vec<HtmlTable> {
    elements(html, "table")
        .into_iter()
        .map(|table| {
            let heading = elements(table, "th")
                .first()
                .map(|th| cell_text(th))
                .filter(|text| !text.is_empty());

            let rows = elements(table, "tr")
                .into_iter()
                .filter_map(|tr| {
                    let cells = elements(tr, "td");
                    if cells.is_empty() {
                        return None;
                    }
                    Some(RawRow {
                        time_range_text: cells.first().map(|c| time_text(c)).unwrap_or_default(),
                        performer_text: cells.get(1).map(|c| cell_text(c)).unwrap_or_default(),
                        performer_link: cells.iter().skip(1).find_map(|c| first_href(c)),
                    })
                })
                .collect();

            HtmlTable { heading, rows }
        })
        .collect()
}

/// Inner HTML of each `<tag ...>...</tag>` block, scanning left to right.
///
/// Matching is ASCII case-insensitive. A missing close tag extends the block
/// to the end of `html`.
fn elements<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = lower[pos..].find(&open) {
        let start = pos + rel;
        let after_name = start + open.len();

        // `<th` must not match `<thead`.
        let boundary = lower.as_bytes().get(after_name).copied();
        if !matches!(boundary, Some(b) if b == b'>' || b == b'/' || b.is_ascii_whitespace()) {
            pos = after_name;
            continue;
        }

        let Some(open_end) = lower[after_name..].find('>').map(|i| after_name + i + 1) else {
            break;
        };
        let close_start = lower[open_end..]
            .find(&close)
            .map_or(lower.len(), |i| open_end + i);

        out.push(&html[open_end..close_start]);
        pos = (close_start + close.len()).min(lower.len());
    }
    out
}

/// Text between tags, entity-decoded and trimmed, skipping empty pieces.
fn text_fragments(html: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                push_fragment(&mut fragments, &current);
                current.clear();
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => current.push(ch),
            _ => {}
        }
    }
    push_fragment(&mut fragments, &current);
    fragments
}

fn push_fragment(fragments: &mut Vec<String>, raw: &str) {
    let decoded = decode_entities(raw);
    let trimmed = decoded.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}

fn cell_text(html: &str) -> String {
    normalize_whitespace(&text_fragments(html).join(" "))
}

fn time_text(html: &str) -> String {
    text_fragments(html).join(TIME_RANGE_SEPARATOR)
}

fn first_href(html: &str) -> Option<String> {
    HREF_RE
        .captures(html)
        .map(|caps| decode_entities(&caps[1]).trim().to_string())
}

/// Longest entity name looked up between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Named entities found on running-order pages: markup escapes, Latin-1
/// letters and typographic punctuation.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", ' '),
    ("auml", 'ä'),
    ("ouml", 'ö'),
    ("uuml", 'ü'),
    ("Auml", 'Ä'),
    ("Ouml", 'Ö'),
    ("Uuml", 'Ü'),
    ("szlig", 'ß'),
    ("aacute", 'á'),
    ("eacute", 'é'),
    ("iacute", 'í'),
    ("oacute", 'ó'),
    ("uacute", 'ú'),
    ("Eacute", 'É'),
    ("agrave", 'à'),
    ("egrave", 'è'),
    ("acirc", 'â'),
    ("ecirc", 'ê'),
    ("ocirc", 'ô'),
    ("aring", 'å'),
    ("Aring", 'Å'),
    ("aelig", 'æ'),
    ("AElig", 'Æ'),
    ("oslash", 'ø'),
    ("Oslash", 'Ø'),
    ("ntilde", 'ñ'),
    ("ccedil", 'ç'),
    ("euml", 'ë'),
    ("iuml", 'ï'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("bdquo", '\u{201e}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
];

/// Resolves the name between `&` and `;`: `#NNN`, `#xHH` or a known name.
fn decode_entity(name: &str) -> Option<char> {
    let Some(number) = name.strip_prefix('#') else {
        return NAMED_ENTITIES
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|(_, ch)| *ch);
    };
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse().ok()?,
    };
    char::from_u32(code)
}

/// Decodes character references. Unknown or unterminated ones are kept as
/// written, and non-breaking spaces become plain spaces.
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&tail[..end]).map(|ch| (ch, end + 1)));

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out.replace('\u{a0}', " ")
}
