use crate::domain::document::{Block, Document, ListItem, Paragraph};
use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+").expect("ordered list marker regex"));
static UNORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•]\s+").expect("unordered list marker regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListMarker {
    Ordered,
    Unordered,
}

impl ListMarker {
    /// 先判斷有序清單，再判斷無序清單
    fn detect(line: &str) -> Option<Self> {
        if ORDERED_MARKER.is_match(line) {
            Some(ListMarker::Ordered)
        } else if UNORDERED_MARKER.is_match(line) {
            Some(ListMarker::Unordered)
        } else {
            None
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            ListMarker::Ordered => &*ORDERED_MARKER,
            ListMarker::Unordered => &*UNORDERED_MARKER,
        }
    }

    fn matches(self, line: &str) -> bool {
        self.pattern().is_match(line)
    }

    fn strip(self, line: &str) -> String {
        self.pattern().replace(line, "").into_owned()
    }

    fn into_block(self, items: Vec<ListItem>) -> Block {
        match self {
            ListMarker::Ordered => Block::OrderedList(items),
            ListMarker::Unordered => Block::UnorderedList(items),
        }
    }
}

/// Converts model output into a document tree.
///
/// Lines are trimmed and scanned once, top to bottom. A run of consecutive
/// lines sharing a list marker becomes one list block; any other run of
/// non-blank lines becomes a paragraph joined with single spaces. Blank
/// lines end the current block and never appear in the output.
pub fn plain_text_to_document(text: &str) -> Document {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(marker) = ListMarker::detect(line) {
            let mut items = Vec::new();
            while i < lines.len() && marker.matches(lines[i]) {
                items.push(ListItem::from_text(marker.strip(lines[i])));
                i += 1;
            }
            blocks.push(marker.into_block(items));
        } else {
            // 收集多行段落，遇到空行或清單行就結束
            let mut paragraph_lines = vec![line];
            i += 1;
            while i < lines.len() && !lines[i].is_empty() && ListMarker::detect(lines[i]).is_none()
            {
                paragraph_lines.push(lines[i]);
                i += 1;
            }
            blocks.push(Block::Paragraph(Paragraph::from_text(
                paragraph_lines.join(" "),
            )));
        }
    }

    Document::new(blocks)
}
