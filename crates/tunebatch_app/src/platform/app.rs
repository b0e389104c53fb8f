use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info};
use tunebatch_core::{update, AppState, AppViewModel, Msg};

use super::config::{self, DEFAULT_CONFIG_FILE};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command, HELP};
use super::ui::render::{render_view, TerminalSink};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = config::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    logging::initialize(config.log_destination);
    engine_info!("tunebatch starting with config {:?}", config_path);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let effects = EffectRunner::new(
        cmd_tx.clone(),
        config.tool_settings(),
        Box::new(TerminalSink::new(config.event_format)),
    );
    spawn_input_reader(cmd_tx);

    println!("Type `help` for commands.");
    let mut app = App::new(AppState::new(config.destination_root()), effects);
    app.dispatch(Msg::CheckDependencies);
    app.run(cmd_rx);

    engine_info!("tunebatch exiting");
    Ok(())
}

/// Single owner of the model: every message is applied here, one at a time.
struct App {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
    input_closed: bool,
}

impl App {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        let view = state.view();
        Self {
            state,
            view,
            effects,
            input_closed: false,
        }
    }

    fn run(&mut self, inbox: mpsc::Receiver<Command>) {
        while let Ok(command) = inbox.recv() {
            match command {
                Command::Dispatch(msg) => self.dispatch(msg),
                Command::Show => println!("{}", render_view(&self.view)),
                Command::Help => println!("{HELP}"),
                Command::Quit => break,
                Command::EndOfInput => self.input_closed = true,
            }
            if self.input_closed && self.is_idle() {
                break;
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.run(effects);
    }

    fn is_idle(&self) -> bool {
        self.state.active_run().is_none() && !self.state.is_fetching()
    }
}

fn spawn_input_reader(cmd_tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match commands::parse(&line) {
                Ok(Some(command)) => {
                    if cmd_tx.send(command).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err}"),
            }
        }
        engine_debug!("stdin closed");
        let _ = cmd_tx.send(Command::EndOfInput);
    });
}
