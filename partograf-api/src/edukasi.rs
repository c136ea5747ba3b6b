use serde::{Deserialize, Serialize};

/// A run of text, bold when it was wrapped in `**`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// Paragraph of non-empty lines, each line a list of spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<Vec<Span>>,
}

/// Split article text into paragraphs (blank-line separated) and lines,
/// dropping whitespace-only ones, and mark `**bold**` segments.
pub fn format_content(body: &str) -> Vec<Paragraph> {
    body.split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| Paragraph {
            lines: paragraph
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(split_bold)
                .collect(),
        })
        .collect()
}

fn split_bold(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };

        push_span(&mut spans, &rest[..open], false);
        push_span(&mut spans, &after_open[..close], true);
        rest = &after_open[close + 2..];
    }

    push_span(&mut spans, rest, false);
    spans
}

fn push_span(spans: &mut Vec<Span>, text: &str, bold: bool) {
    if !text.is_empty() {
        spans.push(Span {
            text: text.to_string(),
            bold,
        });
    }
}
