use once_cell::sync::Lazy;
use regex::Regex;

use syllabus_core::ReferenceSet;

const TEXT_BOOKS: &str = "Text Books";
const REFERENCE_BOOKS: &str = "Reference Books";
const WEB_REFERENCES: &str = "Web References";
/// Sections that may follow the reference lists; they only end a list.
const TRAILING_ANCHORS: &[&str] = &["COs/POs/PSOs Mapping", "Correlation Level"];

/// `N. ` at the start of a line.
static NUMBERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d{1,3}\.\s+").unwrap());

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").unwrap());

static WRAPPED_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Extract the text-book, reference-book and web-reference lists.
///
/// Each section runs from its anchor to the nearest later known anchor (or
/// the end of the text), so a missing or reordered section only affects its
/// own list.
pub fn extract_references(text: &str) -> ReferenceSet {
    let anchors = [
        text.find(TEXT_BOOKS),
        text.find(REFERENCE_BOOKS),
        text.find(WEB_REFERENCES),
    ];
    let boundaries: Vec<usize> = anchors
        .iter()
        .copied()
        .chain(TRAILING_ANCHORS.iter().map(|a| text.find(a)))
        .flatten()
        .collect();
    let [text_books, reference_books, web_references] =
        anchors.map(|start| section(text, start?, &boundaries));

    let refs = ReferenceSet {
        text_books: text_books.map(numbered_items).unwrap_or_default(),
        reference_books: reference_books.map(numbered_items).unwrap_or_default(),
        web_references: web_references.map(web_items).unwrap_or_default(),
    };
    tracing::debug!(
        text_books = refs.text_books.len(),
        reference_books = refs.reference_books.len(),
        web_references = refs.web_references.len(),
        "extracted references"
    );
    refs
}

fn section<'a>(text: &'a str, start: usize, boundaries: &[usize]) -> Option<&'a str> {
    let end = boundaries
        .iter()
        .copied()
        .filter(|&pos| pos > start)
        .min()
        .unwrap_or(text.len());
    Some(&text[start..end])
}

/// Numbered-list entries with wrapped lines joined by single spaces.
fn numbered_items(section: &str) -> Vec<String> {
    let markers: Vec<_> = NUMBERED_ITEM_RE.find_iter(section).collect();
    markers
        .iter()
        .enumerate()
        .filter_map(|(i, m)| {
            let end = markers.get(i + 1).map_or(section.len(), |next| next.start());
            let item = WRAPPED_LINE_RE.replace_all(section[m.end()..end].trim(), " ");
            (!item.is_empty()).then(|| item.into_owned())
        })
        .collect()
}

/// Bare URLs first, then numbered entries that are not themselves URLs.
fn web_items(section: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for url in URL_RE.find_iter(section) {
        let url = url.as_str().to_string();
        if !items.contains(&url) {
            items.push(url);
        }
    }
    for item in numbered_items(section) {
        if !item.starts_with("http") && !items.contains(&item) {
            items.push(item);
        }
    }
    items
}
