use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::categorize::TipCard;
use crate::markdown::markdown_to_lines;

const CARD_BORDER: Color = Color::Rgb(90, 140, 110);
const CARD_TITLE: Color = Color::Rgb(126, 200, 150);
const TEXT_MAIN: Color = Color::Rgb(232, 232, 232);
const TEXT_DIM: Color = Color::Rgb(140, 140, 140);

/// Stacked category cards, starting at `offset`
pub struct TipCards;

pub struct TipCardsProps<'a> {
    pub cards: &'a [TipCard],
    pub offset: usize,
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 tip".to_string()
    } else {
        format!("{count} tips")
    }
}

fn to_rows(line_count: usize) -> u16 {
    u16::try_from(line_count).unwrap_or(u16::MAX)
}

fn card_paragraph(card: &TipCard) -> Paragraph<'static> {
    let body = markdown_to_lines(&card.body(), Style::default().fg(TEXT_MAIN));
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", card.title()),
            Style::default().fg(CARD_TITLE).add_modifier(Modifier::BOLD),
        )))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", count_label(card.count())),
                Style::default().fg(TEXT_DIM),
            ))
            .alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(CARD_BORDER));

    Paragraph::new(body).block(block).wrap(Wrap { trim: false })
}

impl Component<Action> for TipCards {
    type Props<'a> = TipCardsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let bottom = area.y.saturating_add(area.height);
        let mut y = area.y;

        // The marker gets its own row above the first visible card
        let hidden_above = props.offset.min(props.cards.len());
        if hidden_above > 0 && area.height > 0 {
            let marker = Line::from(Span::styled(
                format!("\u{2191} {hidden_above} more"),
                Style::default().fg(TEXT_DIM),
            ))
            .alignment(Alignment::Right);
            frame.render_widget(
                Paragraph::new(marker),
                Rect::new(area.x, area.y, area.width, 1),
            );
            y += 1;
        }

        for card in props.cards.iter().skip(props.offset) {
            if y >= bottom {
                break;
            }
            let paragraph = card_paragraph(card);
            // Wrap width excludes the card's side borders
            let wanted = to_rows(paragraph.line_count(area.width.saturating_sub(2)));
            let height = wanted.min(bottom - y);
            frame.render_widget(paragraph, Rect::new(area.x, y, area.width, height));
            y = y.saturating_add(height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::categorize;
    use tui_dispatch::testing::*;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(1), "1 tip");
        assert_eq!(count_label(3), "3 tips");
    }

    #[test]
    fn test_to_rows_saturates() {
        assert_eq!(to_rows(12), 12);
        assert_eq!(to_rows(70_000), u16::MAX);
    }

    #[test]
    fn test_render_cards() {
        let cards = categorize(&[
            "## 1. Quick Wins",
            "Turn off lights",
            "## 2. Sustainable Living",
            "Compost food waste",
            "- **Buy** local produce",
        ]);
        let mut render = RenderHarness::new(60, 20);
        let mut view = TipCards;

        let output = render.render_to_string_plain(|frame| {
            let props = TipCardsProps {
                cards: &cards,
                offset: 0,
            };
            view.render(frame, frame.area(), props);
        });

        assert!(output.contains("Quick Wins"));
        assert!(output.contains("Turn off lights"));
        assert!(output.contains("1 tip"));
        assert!(output.contains("Sustainable Living"));
        assert!(output.contains("Buy local produce"));
        assert!(output.contains("2 tips"));
    }

    #[test]
    fn test_offset_skips_cards() {
        let cards = categorize(&[
            "## 1. Quick Wins",
            "Turn off lights",
            "## 2. Sustainable Living",
            "Compost food waste",
        ]);
        let mut render = RenderHarness::new(60, 12);
        let mut view = TipCards;

        let output = render.render_to_string_plain(|frame| {
            let props = TipCardsProps {
                cards: &cards,
                offset: 1,
            };
            view.render(frame, frame.area(), props);
        });

        assert!(!output.contains("Turn off lights"));
        assert!(output.contains("Compost food waste"));
        assert!(output.contains("1 more"));
    }

    #[test]
    fn test_more_marker_keeps_card_border_intact() {
        let cards = categorize(&[
            "## 1. Quick Wins",
            "Turn off lights",
            "## 2. Sustainable Living",
            "Compost food waste",
        ]);
        let mut render = RenderHarness::new(60, 12);
        let mut view = TipCards;

        let output = render.render_to_string_plain(|frame| {
            let props = TipCardsProps {
                cards: &cards,
                offset: 1,
            };
            view.render(frame, frame.area(), props);
        });

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("1 more"));
        assert!(!lines[0].contains("Sustainable Living"));
        assert!(lines[1].contains("Sustainable Living"));
        assert!(lines[1].trim_end().ends_with('\u{256e}'), "Top-right corner drawn");
    }
}
