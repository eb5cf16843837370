//! Standalone page template for full-screen viewing and print/PDF export.
//!
//! The report markup is embedded verbatim. Whatever converts the page to a
//! document relies on node order being exactly what the renderer produced.

use crate::config::ReportConfig;
use html_escape::encode_text;

const PAGE_CSS: &str = r#"
    @page {
      size: A4 landscape;
      margin: 5mm;
    }
    * {
      box-sizing: border-box;
      -webkit-print-color-adjust: exact;
      print-color-adjust: exact;
    }
    body {
      font-family: Arial, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
      line-height: 1.5;
      color: #374151;
      margin: 0;
      padding: 12px;
    }
    .report-title {
      color: #1f2937;
      font-size: 20px;
      margin-bottom: 16px;
      border-bottom: 2px solid #3b82f6;
      padding-bottom: 8px;
    }
    table {
      width: 100%;
      border-collapse: collapse;
      page-break-inside: avoid;
      font-size: 10px;
    }
    table, th, td {
      border: 1px solid #e5e7eb;
    }
    th {
      background: #f3f4f6;
      padding: 6px;
      text-align: left;
      font-weight: bold;
      color: #1f2937;
    }
    td {
      padding: 6px;
      vertical-align: top;
      word-wrap: break-word;
    }
    pre {
      white-space: pre-wrap;
      word-break: break-word;
    }
    @media print {
      body {
        padding: 0;
      }
    }
"#;

/// Wraps rendered report markup in a complete HTML page titled with
/// [`ReportConfig::page_title`].
pub fn render_page(markup: &str, config: &ReportConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{css}</style>
</head>
<body>
  <h1 class="report-title">{title}</h1>
  <div class="report-body">
{markup}
  </div>
</body>
</html>
"#,
        title = encode_text(&config.page_title),
        css = PAGE_CSS,
        markup = markup,
    )
}
