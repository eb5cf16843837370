use crate::amount::Amount;
use serde::Serialize;

/// Which parsing path produced a document. Selects the outer wrapper the
/// renderer puts around the blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Built from a JSON-like analysis object.
    Structured,
    /// Parsed from markdown text.
    Markdown,
    /// Opaque text shown as-is.
    PlainText,
    /// No payload at all.
    Empty,
}

/// Synthetic row appended to a table, summarizing one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub column_index: usize,
    pub label: String,
    pub value: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Table {
        caption: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        aggregate: Option<AggregateRow>,
    },
    Rule,
    RawPreformatted {
        text: String,
    },
    Notice {
        text: String,
    },
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }
}

/// Ordered block sequence produced by either parsing path. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    kind: DocumentKind,
    blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn new(kind: DocumentKind, blocks: Vec<Block>) -> Self {
        Self { kind, blocks }
    }

    pub fn empty(notice: impl Into<String>) -> Self {
        Self::new(
            DocumentKind::Empty,
            vec![Block::Notice {
                text: notice.into(),
            }],
        )
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::new(
            DocumentKind::PlainText,
            vec![Block::RawPreformatted { text: text.into() }],
        )
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
