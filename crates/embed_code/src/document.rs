// crates/embed_code/src/document.rs

use crate::block::EMBED_PREFIX;
use crate::embedder::Embedder;

/// An `embed-*` fenced block found in a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedBlock<'d> {
    /// Info string, e.g. `embed-python`.
    pub info: &'d str,
    /// YAML between the fences.
    pub body: String,
}

enum Segment<'d> {
    Text(&'d str),
    Embed(EmbedBlock<'d>),
}

/// Opening backtick fence: returns (backtick count, info string).
fn open_fence(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let ticks = trimmed.chars().take_while(|c| *c == '`').count();
    if ticks < 3 {
        return None;
    }
    Some((ticks, trimmed[ticks..].trim()))
}

fn closes_fence(line: &str, ticks: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= ticks && trimmed.chars().all(|c| c == '`')
}

fn split_segments(markdown: &str) -> Vec<Segment<'_>> {
    let lines: Vec<&str> = markdown.split_inclusive('\n').collect();
    let mut segments = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some((ticks, info)) = open_fence(lines[i]) else {
            segments.push(Segment::Text(lines[i]));
            i += 1;
            continue;
        };
        let close = lines[i + 1..]
            .iter()
            .position(|l| closes_fence(l, ticks))
            .map(|offset| i + 1 + offset);

        match close {
            Some(close) if info.starts_with(EMBED_PREFIX) => {
                segments.push(Segment::Embed(EmbedBlock {
                    info,
                    body: lines[i + 1..close].concat(),
                }));
                // keep the closing fence's line ending
                if lines[close].ends_with('\n') {
                    segments.push(Segment::Text("\n"));
                }
                i = close + 1;
            }
            Some(close) => {
                // ordinary fence: its content is never rendered
                segments.extend(lines[i..=close].iter().map(|l| Segment::Text(*l)));
                i = close + 1;
            }
            None => {
                // unterminated: leave the rest untouched
                segments.extend(lines[i..].iter().map(|l| Segment::Text(*l)));
                break;
            }
        }
    }
    segments
}

/// Lists the embed blocks of `markdown` in document order.
pub fn find_embed_blocks(markdown: &str) -> Vec<EmbedBlock<'_>> {
    split_segments(markdown)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Embed(block) => Some(block),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Replaces every embed block with its rendering; everything else is
/// copied unchanged.
pub fn render_document(markdown: &str, embedder: &Embedder<'_>) -> String {
    let mut out = String::with_capacity(markdown.len());
    for segment in split_segments(markdown) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Embed(block) => {
                tracing::debug!(info = block.info, "rendering embed block");
                out.push_str(&embedder.render_markdown(block.info, &block.body));
            }
        }
    }
    out
}
