//! Plain-text renderer for the terminal
//!
//! Mirrors the HTML renderer's walk but targets a console: collapsed
//! sections show as a single stub line, expanded ones render their blocks.

use super::view_state::ViewState;
use crate::content_model::{AlertType, ContentBlock, Document, Section};
use std::collections::HashMap;

/// Render `doc` for the terminal
pub fn to_text(doc: &Document, view: &ViewState, checked: &HashMap<String, bool>) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", doc.title));
    output.push_str(&format!("{}\n", "=".repeat(doc.title.chars().count())));
    if !doc.description.is_empty() {
        output.push_str(&format!("{}\n", doc.description));
    }
    if !doc.version.is_empty() || !doc.last_updated.is_empty() {
        output.push_str(&format!(
            "v{} (updated {})\n",
            doc.version, doc.last_updated
        ));
    }
    output.push('\n');

    for section in &doc.sections {
        write_section(&mut output, section, view, checked);
    }
    output
}

fn write_section(
    output: &mut String,
    section: &Section,
    view: &ViewState,
    checked: &HashMap<String, bool>,
) {
    let indent = "  ".repeat((section.level - 1) as usize);

    if !view.is_expanded(&section.id) {
        output.push_str(&format!("{}[+] {}\n", indent, section.title));
        return;
    }

    output.push_str(&format!("{}[-] {}\n", indent, section.title));
    for block in &section.content {
        write_block(output, block, &indent, checked);
    }
    for sub in &section.subsections {
        write_section(output, sub, view, checked);
    }
}

fn write_block(
    output: &mut String,
    block: &ContentBlock,
    indent: &str,
    checked: &HashMap<String, bool>,
) {
    let pad = format!("{}    ", indent);
    match block {
        ContentBlock::Paragraph { content } => {
            output.push_str(&format!("{}{}\n", pad, content));
        }
        ContentBlock::Heading { content } => {
            output.push_str(&format!("{}## {}\n", pad, content));
        }
        ContentBlock::Code { content, language } => {
            output.push_str(&format!("{}```{}\n", pad, language));
            for line in content.lines() {
                output.push_str(&format!("{}{}\n", pad, line));
            }
            output.push_str(&format!("{}```\n", pad));
        }
        ContentBlock::Alert {
            alert_type,
            content,
        } => {
            output.push_str(&format!("{}[{}] {}\n", pad, alert_label(*alert_type), content));
        }
        ContentBlock::List { items, ordered } => {
            for (i, item) in items.iter().enumerate() {
                if *ordered {
                    output.push_str(&format!("{}{}. {}\n", pad, i + 1, item));
                } else {
                    output.push_str(&format!("{}- {}\n", pad, item));
                }
            }
        }
        ContentBlock::Checklist { checklist_items } => {
            for item in checklist_items {
                let is_checked = checked
                    .get(&item.id)
                    .copied()
                    .unwrap_or(item.default_checked);
                let mark = if is_checked { "x" } else { " " };
                output.push_str(&format!("{}[{}] {}\n", pad, mark, item.text));
            }
        }
        ContentBlock::Table { headers, rows } => {
            output.push_str(&format!("{}| {} |\n", pad, headers.join(" | ")));
            for row in rows {
                output.push_str(&format!("{}| {} |\n", pad, row.join(" | ")));
            }
        }
        ContentBlock::Divider => {
            output.push_str(&format!("{}---\n", pad));
        }
    }
}

fn alert_label(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::Warning => "WARNING",
        AlertType::Info => "INFO",
        AlertType::Success => "SUCCESS",
        AlertType::Critical => "CRITICAL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_sections_render_as_stubs() {
        let mut intro = Section::new("intro", "Intro", 1);
        intro.content.push(ContentBlock::Paragraph {
            content: "Hidden until expanded".to_string(),
        });
        let document = Document {
            id: "d".to_string(),
            tab_id: "t".to_string(),
            title: "Doc".to_string(),
            description: String::new(),
            version: String::new(),
            last_updated: String::new(),
            sections: vec![intro],
        };

        let view = ViewState::new();
        let text = to_text(&document, &view, &HashMap::new());
        assert!(text.contains("[+] Intro"));
        assert!(!text.contains("Hidden until expanded"));

        let mut view = ViewState::new();
        view.activate_document(&document);
        let text = to_text(&document, &view, &HashMap::new());
        assert!(text.contains("[-] Intro"));
        assert!(text.contains("Hidden until expanded"));
    }

    #[test]
    fn test_checklist_marks_follow_progress() {
        let mut section = Section::new("s", "S", 1);
        section.content.push(ContentBlock::Checklist {
            checklist_items: vec![crate::content_model::ChecklistItem {
                id: "c1".to_string(),
                text: "Deploy".to_string(),
                default_checked: false,
            }],
        });
        let document = Document {
            id: "d".to_string(),
            tab_id: "t".to_string(),
            title: "Doc".to_string(),
            description: String::new(),
            version: String::new(),
            last_updated: String::new(),
            sections: vec![section],
        };
        let mut view = ViewState::new();
        view.activate_document(&document);

        let mut progress = HashMap::new();
        progress.insert("c1".to_string(), true);
        let text = to_text(&document, &view, &progress);
        assert!(text.contains("[x] Deploy"));
    }
}
