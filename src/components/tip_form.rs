use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::{FormField, TipForm};

const INPUT_BG: Color = Color::Rgb(40, 44, 48);
const ACCENT: Color = Color::Rgb(126, 200, 150);
const TEXT_DIM: Color = Color::Rgb(140, 140, 140);

pub const LOCATION_LABEL: &str = "Where do you live?";
pub const LOCATION_PLACEHOLDER: &str = "City, region or country";
pub const HABITS_LABEL: &str = "Describe your daily habits";
pub const HABITS_PLACEHOLDER: &str = "Commute, diet, energy use, shopping...";
pub const SUBMIT_LABEL: &str = "Get Tips";
pub const SUBMIT_LOADING_LABEL: &str = "Generating tips...";

/// Rows needed to render the form, borders included.
pub const FORM_HEIGHT: u16 = 10;

/// The location/habits form with its submit button
pub struct TipFormView {
    location_input: TextInput,
    habits_input: TextInput,
}

pub struct TipFormProps<'a> {
    pub form: &'a TipForm,
    pub focus: FormField,
    pub is_loading: bool,
    pub validation: Option<&'a str>,
    pub is_focused: bool,
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(INPUT_BG),
            fg: None,
        },
        placeholder_style: Some(Style::default().fg(TEXT_DIM)),
        cursor_style: None,
    }
}

fn submit_location(_: String) -> Action {
    Action::FormFocusNext
}

fn submit_habits(_: String) -> Action {
    Action::TipsSubmit
}

fn label_line(text: &str, focused: bool) -> Line<'_> {
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Line::from(Span::styled(text, style))
}

impl Default for TipFormView {
    fn default() -> Self {
        Self {
            location_input: TextInput::new(),
            habits_input: TextInput::new(),
        }
    }
}

impl TipFormView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for TipFormView {
    type Props<'a> = TipFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return vec![Action::Quit],
                KeyCode::Char('s') => return vec![Action::TipsSubmit],
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Tab => return vec![Action::FormFocusNext],
            KeyCode::BackTab => return vec![Action::FormFocusPrev],
            KeyCode::PageDown => return vec![Action::UiScrollDown],
            KeyCode::PageUp => return vec![Action::UiScrollUp],
            _ => {}
        }

        // Everything else is typing into the focused input
        match props.focus {
            FormField::Location => {
                let input_props = TextInputProps {
                    value: &props.form.location,
                    placeholder: LOCATION_PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: Action::FormLocationChange,
                    on_submit: submit_location,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.location_input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
            FormField::Habits => {
                let input_props = TextInputProps {
                    value: &props.form.habits,
                    placeholder: HABITS_PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: Action::FormHabitsChange,
                    on_submit: submit_habits,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.habits_input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .title(" Your details ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if props.is_focused {
                ACCENT
            } else {
                TEXT_DIM
            }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Location label
            Constraint::Length(1), // Location input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Habits label
            Constraint::Length(1), // Habits input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Submit button
            Constraint::Length(1), // Validation
        ])
        .split(inner);

        let location_focused = props.is_focused && props.focus == FormField::Location;
        let habits_focused = props.is_focused && props.focus == FormField::Habits;

        frame.render_widget(
            Paragraph::new(label_line(LOCATION_LABEL, location_focused)),
            chunks[0],
        );
        let location_props = TextInputProps {
            value: &props.form.location,
            placeholder: LOCATION_PLACEHOLDER,
            is_focused: location_focused,
            style: input_style(),
            on_change: Action::FormLocationChange,
            on_submit: submit_location,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.location_input.render(frame, chunks[1], location_props);

        frame.render_widget(
            Paragraph::new(label_line(HABITS_LABEL, habits_focused)),
            chunks[3],
        );
        let habits_props = TextInputProps {
            value: &props.form.habits,
            placeholder: HABITS_PLACEHOLDER,
            is_focused: habits_focused,
            style: input_style(),
            on_change: Action::FormHabitsChange,
            on_submit: submit_habits,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.habits_input.render(frame, chunks[4], habits_props);

        let button = if props.is_loading {
            Span::styled(
                format!("[ {} ]", SUBMIT_LOADING_LABEL),
                Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM),
            )
        } else {
            Span::styled(
                format!("[ {} ]", SUBMIT_LABEL),
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(Paragraph::new(Line::from(button).centered()), chunks[6]);

        if let Some(message) = props.validation {
            let line =
                Line::from(Span::styled(message, Style::default().fg(Color::Yellow))).centered();
            frame.render_widget(Paragraph::new(line), chunks[7]);
        }
    }
}
