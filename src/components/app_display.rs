use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::tip_form::FORM_HEIGHT;
use super::title_header::HEADER_HEIGHT;
use super::{
    Component, TipCards, TipCardsProps, TipFormProps, TipFormView, TitleHeader, TitleHeaderProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
pub const EMPTY_HINT: &str = "Fill in your details and press Enter to get tips";
pub const LOADING_MESSAGE: &str = "Generating your personalized tips...";
pub const NO_CARDS_MESSAGE: &str = "No tips matched any category. Try rephrasing your habits.";

/// Below this height the banner falls back to a single plain line.
const TALL_LAYOUT_MIN_HEIGHT: u16 = 32;

/// Props for AppDisplay - read-only view of state
pub struct AppDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: header, form, error banner, cards, help bar
#[derive(Default)]
pub struct AppDisplay {
    form: TipFormView,
}

impl AppDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn form_props<'a>(state: &'a AppState, is_focused: bool) -> TipFormProps<'a> {
        TipFormProps {
            form: &state.form,
            focus: state.focus,
            is_loading: state.tips.is_loading(),
            validation: state.validation.as_deref(),
            is_focused,
        }
    }
}

impl Component<Action> for AppDisplay {
    type Props<'a> = AppDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let form_props = Self::form_props(props.state, props.is_focused);
        self.form
            .handle_event(event, form_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: AppDisplayProps<'_>) {
        let state = props.state;
        let header_height = if area.height >= TALL_LAYOUT_MIN_HEIGHT {
            HEADER_HEIGHT
        } else {
            2
        };
        let banner_height = if state.tips.is_failed() { 3 } else { 0 };

        let chunks = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Length(banner_height),
            Constraint::Min(1),    // Results
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut header = TitleHeader;
        header.render(
            frame,
            chunks[0],
            TitleHeaderProps {
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        self.form
            .render(frame, chunks[1], Self::form_props(state, props.is_focused));

        if let Some(error) = state.tips.error() {
            render_error_banner(frame, chunks[2], error);
        }

        render_results(frame, chunks[3], state);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("tab", "next field"),
                    StatusBarHint::new("ctrl-s", "submit"),
                    StatusBarHint::new("pgup/pgdn", "scroll"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_error_banner(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let line = Line::from(vec![
        Span::raw(format!("{ERROR_ICON} ")),
        Span::styled("Error: ", Style::default().fg(Color::Red).bold()),
        Span::styled(error.to_string(), Style::default().fg(Color::Rgb(200, 100, 100))),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState) {
    match &state.tips {
        DataResource::Loaded(_) => {
            let cards = state.cards();
            if cards.is_empty() {
                render_message(frame, area, NO_CARDS_MESSAGE);
            } else {
                let mut view = TipCards;
                view.render(
                    frame,
                    area,
                    TipCardsProps {
                        cards: &cards,
                        offset: state.card_offset,
                    },
                );
            }
        }
        DataResource::Loading => render_message(frame, area, LOADING_MESSAGE),
        DataResource::Empty => render_message(frame, area, EMPTY_HINT),
        DataResource::Failed(_) => {}
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    let line = Line::from(vec![Span::styled(
        message,
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}
