//! Line-oriented markdown reader for analysis text.
//!
//! This is deliberately not a CommonMark parser. It recognizes the handful of
//! block forms the analysis service emits (ATX headings, thematic breaks,
//! pipe tables, flat lists) and degrades everything else to paragraphs.
//! Parsing never fails.

use crate::aggregate::{average_row, revenue_column};
use crate::amount::{parse_amount, Amount};
use crate::document::{Block, DocumentKind, ReportDocument};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6}) (.*)$").unwrap());
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// Cheap sniff used during payload classification.
pub fn looks_like_markdown(text: &str) -> bool {
    text.contains('#') || text.contains('|')
}

pub fn parse_markdown(text: &str) -> ReportDocument {
    let mut parser = MarkdownParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParserState {
    Scanning,
    /// Header row read, separator row not yet seen.
    InTableHeader { headers: Vec<String> },
    InTableRows {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    InList { ordered: bool, items: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

pub struct MarkdownParser {
    state: ParserState,
    blocks: Vec<Block>,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Scanning,
            blocks: Vec::new(),
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Consumes one input line.
    pub fn feed(&mut self, raw_line: &str) {
        let line = raw_line.trim();

        match std::mem::replace(&mut self.state, ParserState::Scanning) {
            ParserState::Scanning => self.scan(line),

            ParserState::InTableHeader { headers } => {
                if is_separator_row(line) {
                    self.state = ParserState::InTableRows {
                        headers,
                        rows: Vec::new(),
                    };
                } else if line.contains('|') {
                    self.state = ParserState::InTableRows {
                        headers,
                        rows: vec![split_cells(line)],
                    };
                } else {
                    self.close_table(headers, Vec::new());
                    self.scan(line);
                }
            }

            ParserState::InTableRows { headers, mut rows } => {
                if is_separator_row(line) {
                    self.state = ParserState::InTableRows { headers, rows };
                } else if line.contains('|') {
                    rows.push(split_cells(line));
                    self.state = ParserState::InTableRows { headers, rows };
                } else {
                    self.close_table(headers, rows);
                    self.scan(line);
                }
            }

            ParserState::InList { ordered, mut items } => {
                let kind = if ordered {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                match list_item(line) {
                    Some((k, text)) if k == kind => {
                        items.push(text.to_string());
                        self.state = ParserState::InList { ordered, items };
                    }
                    _ => {
                        self.blocks.push(Block::List { ordered, items });
                        self.scan(line);
                    }
                }
            }
        }
    }

    /// Closes whatever block is open at end of input.
    pub fn finish(mut self) -> ReportDocument {
        match std::mem::replace(&mut self.state, ParserState::Scanning) {
            ParserState::Scanning => {}
            ParserState::InTableHeader { headers } => self.close_table(headers, Vec::new()),
            ParserState::InTableRows { headers, rows } => self.close_table(headers, rows),
            ParserState::InList { ordered, items } => {
                self.blocks.push(Block::List { ordered, items })
            }
        }

        debug!("Parsed markdown into {} blocks", self.blocks.len());
        ReportDocument::new(DocumentKind::Markdown, self.blocks)
    }

    fn scan(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len() as u8;
            self.blocks.push(Block::heading(level, &caps[2]));
        } else if matches!(line, "---" | "***" | "___") {
            self.blocks.push(Block::Rule);
        } else if line.contains('|') {
            self.state = ParserState::InTableHeader {
                headers: split_cells(line),
            };
        } else if let Some((kind, text)) = list_item(line) {
            self.state = ParserState::InList {
                ordered: kind == ListKind::Ordered,
                items: vec![text.to_string()],
            };
        } else {
            self.blocks.push(Block::paragraph(line));
        }
    }

    fn close_table(&mut self, headers: Vec<String>, rows: Vec<Vec<String>>) {
        let aggregate = revenue_column(headers.iter().map(String::as_str)).and_then(|idx| {
            average_row(
                idx,
                rows.iter().map(|row| {
                    row.get(idx)
                        .map(|cell| parse_amount(cell))
                        .unwrap_or(Amount::Unparseable)
                }),
            )
        });

        self.blocks.push(Block::Table {
            caption: None,
            headers,
            rows,
            aggregate,
        });
    }
}

/// Splits a pipe row into trimmed cells, dropping the empty cells produced by
/// leading and trailing pipes.
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// `|---|:---:|` style row: every non-empty cell is dashes, colons and spaces,
/// with at least one dash.
fn is_separator_row(line: &str) -> bool {
    if !line.contains('|') || !line.contains('-') {
        return false;
    }
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .all(|cell| cell.chars().all(|c| matches!(c, '-' | ':' | ' ')))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((ListKind::Unordered, text));
    }
    ORDERED_ITEM
        .find(line)
        .map(|m| (ListKind::Ordered, &line[m.end()..]))
}
