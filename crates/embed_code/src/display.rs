// crates/embed_code/src/display.rs

use embed_error::EmbedError;
use std::fmt;

/// What replaces an embed block in the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// A fenced code block, optionally titled.
    Fenced {
        language: String,
        title: Option<String>,
        body: String,
    },
    /// Markdown passed through as is (markdown cells).
    Markdown(String),
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Fenced {
                language,
                title,
                body,
            } => {
                let fence = fence_for(body);
                write!(f, "{}{}", fence, language)?;
                if let Some(title) = title {
                    write!(f, " title=\"{}\"", title.replace('"', "\\\""))?;
                }
                write!(f, "\n{}\n{}", body, fence)
            }
            Rendered::Markdown(body) => f.write_str(body),
        }
    }
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// A backtick fence longer than any backtick run inside `body`.
fn fence_for(body: &str) -> String {
    "`".repeat(longest_backtick_run(body).max(2) + 1)
}

/// Inline markdown shown in place of content that failed to render.
///
/// The code span delimiter outgrows any backtick run in the message.
pub fn error_markdown(err: &EmbedError) -> String {
    let text = format!("ERROR: {}", err.message());
    let ticks = "`".repeat(longest_backtick_run(&text) + 1);
    if text.ends_with('`') {
        format!("{} {} {}", ticks, text, ticks)
    } else {
        format!("{}{}{}", ticks, text, ticks)
    }
}
