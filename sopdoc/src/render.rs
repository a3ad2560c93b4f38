//! Rendering and view-state layer
//!
//! Recursive renderers over the section tree (HTML for export/printing,
//! plain text for the terminal), the transient expansion state they share,
//! and the small host-environment seams: icon selection and clipboard.

// Submodules
mod html;
mod icon;
mod text;
mod view_state;

// Re-export public types
pub use html::{to_html, to_printable_html};
pub use icon::icon_for_label;
pub use text::to_text;
pub use view_state::ViewState;

use crate::content_model::ContentBlock;
use log::debug;

/// Host clipboard seam for the code-block copy action
pub trait Clipboard {
    /// Put `text` on the clipboard
    fn write(&mut self, text: &str) -> std::io::Result<()>;
}

/// Clipboard that drops everything (headless hosts)
#[derive(Debug, Default)]
pub struct NoopClipboard;

impl Clipboard for NoopClipboard {
    fn write(&mut self, _text: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Copy a code block's content to the clipboard
///
/// Non-code blocks and clipboard failures are ignored; copying is a
/// convenience, never an error path.
pub fn copy_code_block<C: Clipboard>(clipboard: &mut C, block: &ContentBlock) {
    if let ContentBlock::Code { content, .. } = block {
        if let Err(e) = clipboard.write(content) {
            debug!("clipboard write ignored: {}", e);
        }
    }
}
