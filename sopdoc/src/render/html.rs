//! HTML renderer
//!
//! Walks the section tree into a single self-contained HTML page. Sections
//! render as `<details>` elements whose open state mirrors the transient
//! expansion set, with section ids as anchors so search navigation can jump
//! straight to them. `to_printable_html` renders only what is currently
//! expanded, which is the whole contract of the print request.

use super::view_state::ViewState;
use crate::content_model::{AlertType, ContentBlock, Document, Section};
use std::collections::HashMap;

/// Render `doc` as a full HTML page
pub fn to_html(doc: &Document, view: &ViewState, checked: &HashMap<String, bool>) -> String {
    let mut output = String::new();
    write_html_header(&mut output, &doc.title);

    output.push_str("<body>\n");
    output.push_str("<div class=\"container\">\n");
    write_metadata(&mut output, doc);

    for section in &doc.sections {
        write_section(&mut output, section, view, checked, false);
    }

    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");
    output
}

/// Render only the currently expanded sections, for printing
///
/// Collapsed sections are omitted entirely; expanded ones render fully open.
pub fn to_printable_html(
    doc: &Document,
    view: &ViewState,
    checked: &HashMap<String, bool>,
) -> String {
    let mut output = String::new();
    write_html_header(&mut output, &doc.title);

    output.push_str("<body>\n");
    output.push_str("<div class=\"container\">\n");
    write_metadata(&mut output, doc);

    for section in &doc.sections {
        if view.is_expanded(&section.id) {
            write_section(&mut output, section, view, checked, true);
        }
    }

    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");
    output
}

/// Write the HTML head with embedded CSS
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write document title, description and version line
fn write_metadata(output: &mut String, doc: &Document) {
    output.push_str(&format!(
        "<h1 class=\"document-title\">{}</h1>\n",
        escape_html(&doc.title)
    ));
    if !doc.description.is_empty() {
        output.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            escape_html(&doc.description)
        ));
    }
    let mut meta_line = Vec::new();
    if !doc.version.is_empty() {
        meta_line.push(format!("Version {}", escape_html(&doc.version)));
    }
    if !doc.last_updated.is_empty() {
        meta_line.push(format!("Updated {}", escape_html(&doc.last_updated)));
    }
    if !meta_line.is_empty() {
        output.push_str(&format!(
            "<p class=\"meta\">{}</p>\n",
            meta_line.join(" &middot; ")
        ));
    }
}

/// Write one section and its subsections
fn write_section(
    output: &mut String,
    section: &Section,
    view: &ViewState,
    checked: &HashMap<String, bool>,
    force_open: bool,
) {
    let open = if force_open || view.is_expanded(&section.id) {
        " open"
    } else {
        ""
    };
    let heading_level = (section.level + 1).min(6);

    output.push_str(&format!(
        "<details id=\"{}\" class=\"section level-{}\"{}>\n",
        escape_html(&section.id),
        section.level,
        open
    ));
    output.push_str(&format!(
        "<summary><h{} class=\"section-title\">{}</h{}></summary>\n",
        heading_level,
        escape_html(&section.title),
        heading_level
    ));

    for block in &section.content {
        write_block(output, block, checked);
    }
    for sub in &section.subsections {
        write_section(output, sub, view, checked, force_open);
    }

    output.push_str("</details>\n");
}

/// Write one content block
fn write_block(output: &mut String, block: &ContentBlock, checked: &HashMap<String, bool>) {
    match block {
        ContentBlock::Paragraph { content } => {
            output.push_str(&format!("<p>{}</p>\n", escape_html(content)));
        }
        ContentBlock::Heading { content } => {
            output.push_str(&format!(
                "<h4 class=\"block-heading\">{}</h4>\n",
                escape_html(content)
            ));
        }
        ContentBlock::Code { content, language } => {
            let class = if language.is_empty() {
                String::new()
            } else {
                format!(" class=\"language-{}\"", escape_html(language))
            };
            output.push_str(&format!(
                "<pre class=\"code-block\" data-copyable=\"true\"><code{}>{}</code></pre>\n",
                class,
                escape_html(content)
            ));
        }
        ContentBlock::Alert {
            alert_type,
            content,
        } => {
            output.push_str(&format!(
                "<div class=\"alert alert-{}\">{}</div>\n",
                alert_class(*alert_type),
                escape_html(content)
            ));
        }
        ContentBlock::List { items, ordered } => {
            let tag = if *ordered { "ol" } else { "ul" };
            output.push_str(&format!("<{}>\n", tag));
            for item in items {
                output.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
            output.push_str(&format!("</{}>\n", tag));
        }
        ContentBlock::Checklist { checklist_items } => {
            output.push_str("<ul class=\"checklist\">\n");
            for item in checklist_items {
                let is_checked = checked
                    .get(&item.id)
                    .copied()
                    .unwrap_or(item.default_checked);
                let mark = if is_checked { " checked" } else { "" };
                output.push_str(&format!(
                    "<li><input type=\"checkbox\" disabled{}> {}</li>\n",
                    mark,
                    escape_html(&item.text)
                ));
            }
            output.push_str("</ul>\n");
        }
        ContentBlock::Table { headers, rows } => {
            output.push_str("<table>\n<thead>\n<tr>\n");
            for header in headers {
                output.push_str(&format!("<th>{}</th>\n", escape_html(header)));
            }
            output.push_str("</tr>\n</thead>\n<tbody>\n");
            for row in rows {
                output.push_str("<tr>\n");
                for cell in row {
                    output.push_str(&format!("<td>{}</td>\n", escape_html(cell)));
                }
                output.push_str("</tr>\n");
            }
            output.push_str("</tbody>\n</table>\n");
        }
        ContentBlock::Divider => {
            output.push_str("<hr>\n");
        }
    }
}

fn alert_class(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::Warning => "warning",
        AlertType::Info => "info",
        AlertType::Success => "success",
        AlertType::Critical => "critical",
    }
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Embedded stylesheet
const CSS_STYLES: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; color: #1a202c; }
.container { max-width: 860px; margin: 0 auto; padding: 2rem 1rem; }
.document-title { margin-bottom: 0.25rem; }
.description { color: #4a5568; margin-top: 0; }
.meta { color: #718096; font-size: 0.85rem; }
details.section { border: 1px solid #e2e8f0; border-radius: 6px; margin: 0.75rem 0; padding: 0 1rem; }
details.section.level-2, details.section.level-3 { margin-left: 1.25rem; }
summary { cursor: pointer; padding: 0.5rem 0; }
summary h2, summary h3, summary h4 { display: inline; margin: 0; }
pre.code-block { background: #1a202c; color: #e2e8f0; padding: 0.75rem 1rem; border-radius: 6px; overflow-x: auto; }
.alert { border-left: 4px solid; border-radius: 4px; padding: 0.6rem 1rem; margin: 0.6rem 0; }
.alert-warning { border-color: #d69e2e; background: #fffbeb; }
.alert-info { border-color: #3182ce; background: #ebf8ff; }
.alert-success { border-color: #38a169; background: #f0fff4; }
.alert-critical { border-color: #e53e3e; background: #fff5f5; }
ul.checklist { list-style: none; padding-left: 0.5rem; }
table { border-collapse: collapse; width: 100%; margin: 0.6rem 0; }
th, td { border: 1px solid #e2e8f0; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f7fafc; }
hr { border: none; border-top: 1px solid #e2e8f0; margin: 1rem 0; }
"#;
