//! Markdown to styled ratatui lines for card bodies

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const LINK_COLOR: Color = Color::Rgb(120, 190, 230);
const CODE_COLOR: Color = Color::Rgb(222, 196, 120);
const DIM: Color = Color::DarkGray;

struct LineBuilder {
    lines: Vec<Vec<Span<'static>>>,
    /// Set right after a list marker so the item's paragraph stays on the same line
    after_marker: bool,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            after_marker: false,
        }
    }

    fn current(&mut self) -> &mut Vec<Span<'static>> {
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    fn push(&mut self, text: impl Into<String>, style: Style) {
        self.after_marker = false;
        self.current().push(Span::styled(text.into(), style));
    }

    fn break_line(&mut self) {
        self.lines.push(Vec::new());
    }

    /// Start a new line unless the current one is still empty
    fn ensure_fresh_line(&mut self) {
        if !self.current().is_empty() {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.into_iter().map(Line::from).collect()
    }
}

/// Render markdown text: bold, emphasis, inline code, lists, headings and links.
pub fn markdown_to_lines(text: &str, base_style: Style) -> Vec<Line<'static>> {
    let mut out = LineBuilder::new();
    let mut style_stack: Vec<Style> = vec![base_style];
    // One entry per open list; Some(n) is the next ordinal of an ordered list
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut link: Option<(String, String)> = None;

    for event in Parser::new(text) {
        let top = style_stack.last().copied().unwrap_or(base_style);
        match event {
            Event::Start(Tag::Strong) => style_stack.push(top.add_modifier(Modifier::BOLD)),
            Event::Start(Tag::Emphasis) => style_stack.push(top.add_modifier(Modifier::ITALIC)),
            Event::Start(Tag::Heading { .. }) => {
                out.ensure_fresh_line();
                style_stack.push(top.add_modifier(Modifier::BOLD));
            }
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Heading(_)) => {
                style_stack.pop();
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                style_stack.push(top.fg(LINK_COLOR).add_modifier(Modifier::UNDERLINED));
                link = Some((dest_url.to_string(), String::new()));
            }
            Event::End(TagEnd::Link) => {
                style_stack.pop();
                if let Some((url, label)) = link.take() {
                    if !url.is_empty() && url != label {
                        out.push(format!(" ({url})"), Style::default().fg(DIM));
                    }
                }
            }
            Event::Start(Tag::List(start)) => {
                out.ensure_fresh_line();
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                out.ensure_fresh_line();
                let indent = "  ".repeat(lists.len().saturating_sub(1));
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}\u{2022} "),
                };
                out.push(marker, Style::default().fg(DIM));
                out.after_marker = true;
            }
            Event::Start(Tag::Paragraph) => {
                if !out.after_marker {
                    out.ensure_fresh_line();
                }
            }
            Event::Code(code) => {
                out.push(code.to_string(), Style::default().fg(CODE_COLOR));
            }
            Event::Text(text) => {
                if let Some((_, label)) = link.as_mut() {
                    label.push_str(&text);
                }
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        out.break_line();
                    }
                    if !part.is_empty() {
                        out.push(part.to_string(), top);
                    }
                }
            }
            Event::SoftBreak => out.push(" ", top),
            Event::HardBreak => out.break_line(),
            _ => {}
        }
    }

    out.finish()
}
