use std::io::BufRead;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, Offset};
use console::Term;
use insight_core::{update, AppState, Msg};
use insight_engine::ReqwestInsightApi;
use insight_logging::{insight_info, insight_warn};

use super::effects::EffectRunner;
use super::input::{self, InputAction};
use super::{config, logging, ui};

const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    Status(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let resolved = config::load().context("failed to load configuration")?;
    logging::initialize(
        resolved.settings.log_destination,
        resolved.settings.log_level_filter(),
    );
    if resolved.settings.parsed_log_level().is_none() {
        insight_warn!(
            "Unknown log level {:?}; using info",
            resolved.settings.log_level
        );
    }
    insight_info!("Starting against {}", resolved.api_base.as_url());

    let api = ReqwestInsightApi::new(
        resolved.api_base.clone(),
        &resolved.settings.client_settings(),
    )
    .context("failed to build HTTP client")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(
        Arc::new(api),
        resolved.settings.estimator_settings(),
        event_tx.clone(),
    );
    spawn_input_reader(event_tx.clone());

    // Background tick to throttle rendering.
    thread::spawn(move || {
        while event_tx.send(AppEvent::Core(Msg::Tick)).is_ok() {
            thread::sleep(RENDER_INTERVAL);
        }
    });

    let offset = Local::now().offset().fix();
    let mut shell = Shell::new(AppState::new().with_utc_offset(offset), runner);
    shell.render();

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(Msg::Tick) => {
                shell.dispatch(Msg::Tick);
                shell.render_if_needed();
            }
            AppEvent::Core(msg) => shell.dispatch(msg),
            AppEvent::Status(text) => shell.set_status(text),
            AppEvent::Quit => break,
        }
    }

    insight_info!("Shutting down");
    Ok(())
}

/// Owns the state and applies every transition on the loop thread.
struct Shell {
    state: AppState,
    runner: EffectRunner,
    term: Term,
    status: String,
    status_changed: bool,
}

impl Shell {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            term: Term::stdout(),
            status: String::new(),
            status_changed: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if !effects.is_empty() {
            self.runner.enqueue(effects);
        }
    }

    fn set_status(&mut self, text: String) {
        self.status = text;
        self.status_changed = true;
    }

    fn render_if_needed(&mut self) {
        let dirty = self.state.consume_dirty();
        if dirty || self.status_changed {
            self.render();
        }
    }

    fn render(&mut self) {
        self.status_changed = false;
        let _ = self.state.consume_dirty();
        let lines = ui::render::render(&self.state.view(), &self.status);
        if let Err(err) = self.term.clear_screen() {
            insight_warn!("Failed to clear terminal: {}", err);
        }
        for line in lines {
            if let Err(err) = self.term.write_line(&line) {
                insight_warn!("Failed to write to terminal: {}", err);
                return;
            }
        }
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    insight_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = match input::interpret(&line) {
                Some(InputAction::Dispatch(msg)) => AppEvent::Core(msg),
                Some(InputAction::Status(text)) => AppEvent::Status(text),
                Some(InputAction::Quit) => AppEvent::Quit,
                None => continue,
            };
            let quit = matches!(event, AppEvent::Quit);
            if tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}
