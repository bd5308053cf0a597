//! Panel event loop.
//!
//! Single-threaded, event-driven: the credential gate runs first as a
//! masked modal prompt, then the action loop services key presses until the
//! operator quits. Script launches never block the loop.

pub mod input;
mod view;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::PanelConfig;
use crate::credential::{self, Credential, CredentialPrompt, GateOutcome, SudoChmod};
use crate::session::{SessionController, StartMode, Status, UriChange};
use crate::Result;

use input::{InputEvent, LineInput};

/// Action labels, in panel order.
pub(crate) const ACTIONS: [&str; 3] = [
    "Start applications",
    "Start in debug mode",
    "Stop applications",
];

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Modal line prompt shown over the panel.
pub(crate) struct Modal {
    title: String,
    prompt: String,
    error: Option<String>,
    input: LineInput,
}

/// Display state read by the renderer.
pub(crate) struct PanelState {
    title: String,
    footer: String,
    selected: usize,
    actions_enabled: bool,
    status: Status,
    message: String,
    modal: Option<Modal>,
}

/// Run the panel to completion: terminal setup, credential gate, action
/// loop, terminal restore.
///
/// # Errors
///
/// Returns an error when the terminal cannot be driven or the elevation
/// program cannot be spawned at all. Per-action failures stay inside the
/// loop as operator-visible messages.
pub fn run(config: PanelConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, config);
    restore_terminal(&mut terminal);
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

fn run_inner(terminal: &mut Tui, config: PanelConfig) -> Result<()> {
    let mut state = PanelState {
        title: config.title.clone(),
        footer: config.footer.clone(),
        selected: 0,
        actions_enabled: false,
        status: Status::default(),
        message: String::new(),
        modal: None,
    };

    let targets = config.script_paths();
    let mut controller = SessionController::new(config);

    let outcome = {
        let mut prompt = GatePrompt {
            terminal: &mut *terminal,
            state: &mut state,
        };
        let mut runner = SudoChmod::new();
        credential::obtain_and_apply(&mut prompt, &mut runner, &targets)?
    };

    match outcome {
        GateOutcome::Granted => {
            state.actions_enabled = true;
            state.message = "Scripts are executable. Ready.".into();
        }
        GateOutcome::Cancelled => {
            warn!("credential gate cancelled; disabling actions");
            state.actions_enabled = false;
            state.message =
                "Administrator credential not provided. Actions are disabled.".into();
        }
    }

    loop {
        state.status = controller.status();
        terminal.draw(|frame| view::draw(frame, &state))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Up => state.selected = state.selected.saturating_sub(1),
            KeyCode::Down => {
                state.selected = (state.selected + 1).min(ACTIONS.len() - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let action = state.selected;
                run_action(terminal, &mut state, &mut controller, action)?;
            }
            KeyCode::Char('s') => run_action(terminal, &mut state, &mut controller, 0)?,
            KeyCode::Char('d') => run_action(terminal, &mut state, &mut controller, 1)?,
            KeyCode::Char('x') => run_action(terminal, &mut state, &mut controller, 2)?,
            _ => {}
        }
    }

    info!("panel closed by operator");
    Ok(())
}

fn run_action(
    terminal: &mut Tui,
    state: &mut PanelState,
    controller: &mut SessionController,
    action: usize,
) -> Result<()> {
    if !state.actions_enabled {
        state.message =
            "Actions are disabled: administrator credential was not provided.".into();
        return Ok(());
    }

    match action {
        0 => start_flow(terminal, state, controller, StartMode::Normal),
        1 => start_flow(terminal, state, controller, StartMode::Debug),
        _ => {
            stop_flow(state, controller);
            Ok(())
        }
    }
}

fn start_flow(
    terminal: &mut Tui,
    state: &mut PanelState,
    controller: &mut SessionController,
    mode: StartMode,
) -> Result<()> {
    let current = match controller.current_uri() {
        Ok(value) => value.unwrap_or_default(),
        Err(err) => {
            state.message = err.to_string();
            return Ok(());
        }
    };

    let modal = Modal {
        title: "MongoDB URI".into(),
        prompt: format!(
            "Enter the new MongoDB URI (leave blank to keep the current one)\nCurrent: {current}"
        ),
        error: None,
        input: LineInput::new(false),
    };
    let Some(submission) = prompt_modal(terminal, state, modal)? else {
        state.message = "Start cancelled; configuration unchanged.".into();
        return Ok(());
    };

    let mut message = String::new();
    match controller.apply_uri_submission(&submission) {
        Ok(UriChange::Unchanged) => {}
        Ok(UriChange::Updated(uri)) => {
            message = format!("MongoDB URI updated to {uri}. ");
        }
        Err(err) => {
            state.message = err.to_string();
            return Ok(());
        }
    }

    match controller.start(mode) {
        Ok(()) => message.push_str("Applications started."),
        Err(err) => message = err.to_string(),
    }
    state.message = message;
    Ok(())
}

fn stop_flow(state: &mut PanelState, controller: &mut SessionController) {
    state.message = match controller.stop() {
        Ok(()) => "Applications stopped.".into(),
        Err(err) => err.to_string(),
    };
}

fn prompt_modal(
    terminal: &mut Tui,
    state: &mut PanelState,
    modal: Modal,
) -> Result<Option<String>> {
    state.modal = Some(modal);

    let submission = loop {
        terminal.draw(|frame| view::draw(frame, state))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(active) = state.modal.as_mut() else {
            break None;
        };
        match active.input.handle_key(key) {
            InputEvent::Submitted => break Some(active.input.take()),
            InputEvent::Cancelled => break None,
            InputEvent::Editing => {}
        }
    };

    state.modal = None;
    Ok(submission)
}

/// Credential prompt backed by a masked modal over the panel.
struct GatePrompt<'a> {
    terminal: &'a mut Tui,
    state: &'a mut PanelState,
}

impl CredentialPrompt for GatePrompt<'_> {
    fn prompt(&mut self, last_error: Option<&str>) -> Result<Option<Credential>> {
        let modal = Modal {
            title: "Administrator credential".into(),
            prompt: "Enter the administrator password to make the stack scripts executable."
                .into(),
            error: last_error.map(|detail| format!("Elevation failed: {detail}")),
            input: LineInput::new(true),
        };
        Ok(prompt_modal(self.terminal, self.state, modal)?.map(Credential::new))
    }
}
