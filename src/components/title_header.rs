use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

pub const APP_TITLE: &str = "EcoTips";
pub const APP_SUBTITLE: &str = "Personalized sustainability tips for where and how you live";

/// Banner rows for the tallest font plus the subtitle line.
pub const HEADER_HEIGHT: u16 = 7;

pub struct TitleHeader;

pub struct TitleHeaderProps {
    pub is_animating: bool,
    pub tick_count: u32,
}

fn title_colors() -> (ArtColor, ArtColor) {
    (
        ArtColor::rgb(100, 200, 150), // Leaf green
        ArtColor::rgb(100, 180, 255), // Sky blue
    )
}

/// Two-stop gradient whose ends swap colours over one animation cycle.
fn title_fill(phase: f32) -> Fill {
    let (leaf, sky) = title_colors();
    // Triangle wave so the cycle wraps without a jump
    let t = 1.0 - (2.0 * phase.rem_euclid(1.0) - 1.0).abs();
    let stops = vec![
        ColorStop::new(0.0, leaf.interpolate(sky, t)),
        ColorStop::new(1.0, sky.interpolate(leaf, t)),
    ];
    Fill::Linear(LinearGradient::new(5.0, stops))
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

impl Component<Action> for TitleHeader {
    type Props<'a> = TitleHeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title
            Constraint::Length(1), // Subtitle
        ])
        .split(area);

        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };
        let fill = title_fill(phase);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(fill);
        frame.render_widget(ArtBox::new(&renderer, APP_TITLE), chunks[0]);

        let subtitle = Line::from(vec![Span::styled(
            APP_SUBTITLE,
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(subtitle), chunks[1]);
    }
}
