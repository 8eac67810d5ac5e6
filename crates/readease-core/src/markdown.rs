//! Markdown to prose conversion for scoring.
//!
//! Uses pulldown-cmark for CommonMark parsing. Code, headings, HTML and
//! frontmatter are dropped. Every remaining block (paragraph, list item,
//! table cell) is closed with a sentence delimiter when it does not already
//! end with one, so a bullet list scores as several short sentences instead
//! of one run-on sentence.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Characters that already end a sentence for the segmenter.
const SENTENCE_END: &[char] = &['.', '!', ':', ';', '(', ')'];

/// Strip markdown formatting, returning plain prose text.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut prose = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Image { .. }) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Image) => {
                skip_depth = skip_depth.saturating_sub(1);
            }

            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),

            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::TableCell)
                if skip_depth == 0 =>
            {
                close_block(&mut prose);
            }

            _ => {}
        }
    }

    prose.trim_end().to_string()
}

/// Terminate the current block unless it is empty or already terminated.
fn close_block(prose: &mut String) {
    let trimmed_len = prose.trim_end().len();
    prose.truncate(trimmed_len);
    match prose.chars().last() {
        None => return,
        Some(c) if SENTENCE_END.contains(&c) => {}
        Some(_) => prose.push('.'),
    }
    prose.push(' ');
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
