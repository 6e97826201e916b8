use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use engine_logging::engine_info;
use speakpage_core::{update, AppState, Msg, TabId};

use super::commands::{parse_command, Command, HELP};
use super::effects::EffectRunner;
use super::render::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

enum Input {
    Line(String),
    Closed,
}

/// Run the terminal popup for `tab_id` until the user quits, or until stdin
/// closes and the last request has answered.
pub fn run(runner: EffectRunner, tab_id: TabId) -> anyhow::Result<()> {
    let (input_tx, input_rx) = mpsc::channel();
    spawn_stdin_reader(input_tx);

    let mut out = io::stdout();
    let mut state = AppState::new(tab_id);
    writeln!(out, "{HELP}")?;
    writeln!(out, "{}", render(&state.view()))?;

    let mut input_closed = false;
    loop {
        for msg in runner.poll_events(tab_id) {
            state = step(state, msg, &runner, &mut out)?;
        }

        if input_closed {
            if !state.is_busy() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Line(line)) => match parse_command(&line) {
                Ok(Command::Messages(msgs)) => {
                    for msg in msgs {
                        state = step(state, msg, &runner, &mut out)?;
                    }
                }
                Ok(Command::Help) => writeln!(out, "{HELP}")?,
                Ok(Command::Quit) => break,
                Err(err) => writeln!(out, "{err}")?,
            },
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => input_closed = true,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }

    engine_info!("Popup closed");
    runner.shutdown();
    Ok(())
}

fn step(
    state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    out: &mut impl Write,
) -> io::Result<AppState> {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        writeln!(out, "{}", render(&state.view()))?;
        out.flush()?;
    }
    Ok(state)
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });
}
