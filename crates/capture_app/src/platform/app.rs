use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use capture_core::{update, AppState, AppViewModel, Msg};
use capture_logging::{capture_info, capture_warn};
use chrono::Local;

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, UiCommand, HELP_TEXT};
use super::ui::render::render;

/// Everything the main loop reacts to, from the input thread or the engine.
pub(crate) enum AppEvent {
    Ui(UiCommand),
    Msg(Msg),
    InputError(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path(std::env::args().nth(1));
    let (app_config, load_error) = match config::load(&config_path) {
        Ok(app_config) => (app_config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(app_config.log_destination);
    capture_info!("capture_app started, config {:?}", config_path);
    if let Some(err) = load_error {
        capture_warn!("{}; using defaults", err);
    }

    let defaults = app_config
        .form_defaults()
        .with_context(|| format!("invalid defaults in {:?}", config_path))?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(app_config.capture_settings(), event_tx.clone());
    spawn_input_reader(event_tx);

    let mut state = AppState::with_defaults(defaults);
    let mut input_closed = false;
    print_view(&state.view());
    println!("Type `help` for commands.");

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Ui(UiCommand::Msg(msg)) | AppEvent::Msg(msg) => {
                let (next, new_effects) = update(state, msg);
                state = next;
                effects.enqueue(new_effects);
                if state.consume_dirty() {
                    print_view(&state.view());
                }
            }
            AppEvent::Ui(UiCommand::Show) => print_view(&state.view()),
            AppEvent::Ui(UiCommand::Help) => println!("{HELP_TEXT}"),
            AppEvent::Ui(UiCommand::Quit) => break,
            AppEvent::InputError(message) => println!("{message}"),
            AppEvent::InputClosed => input_closed = true,
        }

        // With piped input, stay up until the last capture resolves.
        if input_closed && !state.status().is_pending() {
            break;
        }
    }

    capture_info!("capture_app exiting");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => match parse_command(&line) {
                    Ok(Some(command)) => AppEvent::Ui(command),
                    Ok(None) => continue,
                    Err(err) => AppEvent::InputError(err.to_string()),
                },
                Err(err) => {
                    capture_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

fn print_view(view: &AppViewModel) {
    let timestamp = Local::now().format("%H:%M:%S").to_string();
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", render(view, &timestamp));
    let _ = stdout.flush();
}
