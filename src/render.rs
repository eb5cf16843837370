//! HTML serialization of a [`ReportDocument`].
//!
//! Output is a pure function of the document and the config: the same input
//! always yields byte-identical markup. Class names follow the Tailwind
//! utility set the hosting page ships with, and [`STYLESHEET`] carries the
//! few rules utilities cannot express.

use crate::config::ReportConfig;
use crate::document::{AggregateRow, Block, DocumentKind, ReportDocument};
use html_escape::encode_text;
use log::info;

pub const STYLESHEET: &str = r#"<style>
  .analysis-report h2 {
    position: relative;
    padding-bottom: 0.5rem;
  }
  .analysis-report h2::after {
    content: "";
    position: absolute;
    bottom: 0;
    left: 0;
    height: 2px;
    width: 40px;
    background-color: #3b82f6;
  }
  .analysis-report table {
    border-collapse: separate;
    border-spacing: 0;
    width: 100%;
    margin: 1rem 0;
    box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    border-radius: 0.5rem;
    overflow: hidden;
  }
  .analysis-report th {
    position: sticky;
    top: 0;
    z-index: 10;
  }
  .analysis-report tr.aggregate-row td {
    border-top: 2px solid #bfdbfe;
  }
</style>"#;

const HEADING_CLASSES: [&str; 6] = [
    "text-2xl font-bold text-gray-900 mt-6 mb-4",
    "text-xl font-semibold text-gray-900 mt-5 mb-3",
    "text-lg font-medium text-gray-800 mt-4 mb-2",
    "text-base font-medium text-gray-800 mt-3 mb-2",
    "text-sm font-medium text-gray-800 mt-3 mb-2",
    "text-xs font-medium text-gray-800 mt-2 mb-1",
];

const TABLE_CLASS: &str = "min-w-full divide-y divide-gray-200 rounded-lg overflow-hidden";
const TH_CLASS: &str =
    "px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-500";
const AGGREGATE_TD_CLASS: &str =
    "px-6 py-3 whitespace-nowrap text-sm font-semibold text-gray-700";
const AGGREGATE_BLANK_TD_CLASS: &str = "px-6 py-3 whitespace-nowrap text-sm text-gray-500";
const PRE_CLASS: &str = "whitespace-pre-wrap bg-gray-50 p-4 rounded-md font-mono text-sm";

pub fn render_document(document: &ReportDocument) -> String {
    HtmlRenderer::new(&ReportConfig::default()).render(document)
}

pub struct HtmlRenderer<'a> {
    config: &'a ReportConfig,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, document: &ReportDocument) -> String {
        info!(
            "Rendering {:?} report with {} blocks",
            document.kind(),
            document.len()
        );

        let mut html = String::new();
        match document.kind() {
            DocumentKind::Empty => {
                for block in document.blocks() {
                    render_block(&mut html, block);
                }
            }
            DocumentKind::PlainText => {
                html.push_str(r#"<div class="analysis-report">"#);
                for block in document.blocks() {
                    match block {
                        Block::RawPreformatted { text } => {
                            html.push_str(&format!(
                                r#"<pre class="{}">{}</pre>"#,
                                PRE_CLASS,
                                encode_text(text)
                            ));
                        }
                        other => render_block(&mut html, other),
                    }
                }
                html.push_str("</div>");
            }
            DocumentKind::Structured | DocumentKind::Markdown => {
                if self.config.embed_styles {
                    html.push_str(STYLESHEET);
                }
                let spacing = if document.kind() == DocumentKind::Structured {
                    "space-y-6"
                } else {
                    "space-y-4"
                };
                html.push_str(&format!(r#"<div class="analysis-report {}">"#, spacing));
                for block in document.blocks() {
                    render_block(&mut html, block);
                }
                html.push_str("</div>");
            }
        }
        html
    }
}

fn render_block(html: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            html.push_str(&format!(
                r#"<h{lvl} class="{class}">{text}</h{lvl}>"#,
                lvl = level,
                class = HEADING_CLASSES[usize::from(level) - 1],
                text = encode_text(text),
            ));
        }
        Block::Paragraph { text } => {
            html.push_str(&format!(
                r#"<p class="text-gray-600">{}</p>"#,
                encode_text(text)
            ));
        }
        Block::List { ordered, items } => {
            let (tag, class) = if *ordered {
                ("ol", "list-decimal pl-5 space-y-2 text-gray-600")
            } else {
                ("ul", "list-disc pl-5 space-y-2 text-gray-600")
            };
            html.push_str(&format!(r#"<{} class="{}">"#, tag, class));
            for item in items {
                html.push_str(&format!("<li>{}</li>", encode_text(item)));
            }
            html.push_str(&format!("</{}>", tag));
        }
        Block::Table {
            caption,
            headers,
            rows,
            aggregate,
        } => render_table(html, caption.as_deref(), headers, rows, aggregate.as_ref()),
        Block::Rule => html.push_str(r#"<hr class="my-4 border-t border-gray-200">"#),
        Block::RawPreformatted { text } => {
            html.push_str(&format!(
                r#"<pre class="{} overflow-x-auto">{}</pre>"#,
                PRE_CLASS,
                encode_text(text)
            ));
        }
        Block::Notice { text } => {
            html.push_str(&format!(
                r#"<div class="p-4 text-gray-500">{}</div>"#,
                encode_text(text)
            ));
        }
    }
}

fn render_table(
    html: &mut String,
    caption: Option<&str>,
    headers: &[String],
    rows: &[Vec<String>],
    aggregate: Option<&AggregateRow>,
) {
    html.push_str(r#"<div class="overflow-x-auto">"#);
    html.push_str(&format!(r#"<table class="{}">"#, TABLE_CLASS));
    if let Some(caption) = caption {
        html.push_str(&format!(
            r#"<caption class="sr-only">{}</caption>"#,
            encode_text(caption)
        ));
    }

    html.push_str(r#"<thead class="bg-gray-50"><tr>"#);
    for header in headers {
        html.push_str(&format!(
            r#"<th scope="col" class="{}">{}</th>"#,
            TH_CLASS,
            encode_text(header)
        ));
    }
    html.push_str("</tr></thead>");

    html.push_str(r#"<tbody class="bg-white divide-y divide-gray-200">"#);
    for (idx, row) in rows.iter().enumerate() {
        let shade = if idx % 2 == 0 { "bg-white" } else { "bg-gray-50" };
        html.push_str(&format!(r#"<tr class="{}">"#, shade));
        for cell in row.iter().take(headers.len()) {
            html.push_str(&format!(
                r#"<td class="{}">{}</td>"#,
                TD_CLASS,
                encode_text(cell)
            ));
        }
        html.push_str("</tr>");
    }

    if let Some(aggregate) = aggregate {
        html.push_str(r#"<tr class="bg-blue-50 aggregate-row">"#);
        for idx in 0..headers.len() {
            if idx == aggregate.column_index {
                html.push_str(&format!(
                    r#"<td class="{}">{}</td>"#,
                    AGGREGATE_TD_CLASS,
                    encode_text(&aggregate.label)
                ));
            } else {
                html.push_str(&format!(r#"<td class="{}"></td>"#, AGGREGATE_BLANK_TD_CLASS));
            }
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
}
