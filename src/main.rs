//! EcoTips - sustainability tips in the terminal

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ecotips::action::Action;
use ecotips::api::{TipsClient, TipsRequest};
use ecotips::categorize::categorize;
use ecotips::components::tip_cards::count_label;
use ecotips::components::{AppDisplay, AppDisplayProps, Component};
use ecotips::config::{Config, DEFAULT_API_URL};
use ecotips::effect::Effect;
use ecotips::logging;
use ecotips::reducer::reducer;
use ecotips::state::{AppState, LOADING_ANIM_TICK_MS, TIPS_ERROR_MESSAGE};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// EcoTips - personalized sustainability tips
#[derive(Parser, Debug)]
#[command(name = "ecotips")]
#[command(about = "Ask the tips service how to live more sustainably")]
struct Args {
    /// Base URL of the tips service
    #[arg(long, env = "ECOTIPS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Prefill the location field
    #[arg(long, default_value = "")]
    location: String,

    /// Prefill the habits field
    #[arg(long, default_value = "")]
    habits: String,

    /// Submit the prefilled form on startup
    #[arg(long)]
    submit: bool,

    /// Fetch once and print the cards to stdout instead of starting the UI
    #[arg(long)]
    once: bool,

    /// Write logs to this file
    #[arg(long, env = "ECOTIPS_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            location: self.location.clone(),
            habits: self.habits.clone(),
            submit_on_start: self.submit,
            log_file: self.log_file.clone(),
            verbose: self.verbose,
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum TipsComponentId {
    Main,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum TipsContext {
    Main,
}

impl EventRoutingState<TipsComponentId, TipsContext> for AppState {
    fn focused(&self) -> Option<TipsComponentId> {
        Some(TipsComponentId::Main)
    }

    fn modal(&self) -> Option<TipsComponentId> {
        None
    }

    fn binding_context(&self, _id: TipsComponentId) -> TipsContext {
        TipsContext::Main
    }

    fn default_context(&self) -> TipsContext {
        TipsContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    let config = args.config();

    let _log_guard = match &config.log_file {
        Some(path) => Some(logging::init(path, config.verbose)?),
        None => None,
    };
    tracing::info!(api_url = %config.api_url, "starting ecotips");

    let client = Arc::new(TipsClient::new(&config.api_url));

    if args.once {
        return run_once(&client, &config).await;
    }

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial = config.initial_state();
    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let initial_action = config.submit_on_start.then_some(Action::TipsSubmit);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        initial_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(ExitCode::SUCCESS)
}

/// Non-interactive mode: one request, cards printed as plain text
async fn run_once(client: &TipsClient, config: &Config) -> io::Result<ExitCode> {
    let form = config.initial_form();
    if !form.is_complete() {
        eprintln!("Error: --once needs both --location and --habits.");
        return Ok(ExitCode::from(2));
    }

    let request = TipsRequest {
        location: form.location.trim().to_string(),
        habits: form.habits.trim().to_string(),
    };
    let lines = match client.fetch_tips(&request).await {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(error = %e, endpoint = client.endpoint(), "tip request failed");
            eprintln!("Error: {}", TIPS_ERROR_MESSAGE);
            eprintln!("Details: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = io::stdout().lock();
    for card in categorize(lines.as_slice()) {
        writeln!(stdout, "{} ({})", card.title(), count_label(card.count()))?;
        for line in &card.lines {
            writeln!(stdout, "  {}", line)?;
        }
        writeln!(stdout)?;
    }
    Ok(ExitCode::SUCCESS)
}

struct TipsUi {
    display: AppDisplay,
}

impl TipsUi {
    fn new() -> Self {
        Self {
            display: AppDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<TipsComponentId>,
    ) {
        event_ctx.set_component_area(TipsComponentId::Main, area);

        let props = AppDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = AppDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: Arc<TipsClient>,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(TipsUi::new()));
    let mut bus: EventBus<AppState, Action, TipsComponentId, TipsContext> = EventBus::new();
    let keybindings: Keybindings<TipsContext> = Keybindings::new();

    let ui_main = Rc::clone(&ui);
    bus.register(TipsComponentId::Main, move |event, state| {
        ui_main.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &Arc<TipsClient>) {
    match effect {
        Effect::FetchTips { location, habits } => {
            let client = Arc::clone(client);
            tracing::info!(location = location.as_str(), "requesting tips");
            // Keyed so at most one tips request is in flight
            ctx.tasks().spawn("tips", async move {
                let request = TipsRequest { location, habits };
                match client.fetch_tips(&request).await {
                    Ok(lines) => {
                        tracing::debug!(count = lines.len(), "tips received");
                        Action::TipsDidLoad(lines)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, endpoint = client.endpoint(), "tip request failed");
                        Action::TipsDidError(e.to_string())
                    }
                }
            });
        }
    }
}
