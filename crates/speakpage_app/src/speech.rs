//! Speech engine backed by an `espeak-ng` child process.
use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};

use engine_logging::{engine_debug, engine_warn};
use speakpage_engine::{SpeechEngine, SpeechError, Utterance};

pub const DEFAULT_SPEECH_PROGRAM: &str = "espeak-ng";
const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const MIN_WORDS_PER_MINUTE: f32 = 80.0;
const MAX_WORDS_PER_MINUTE: f32 = 500.0;

/// One child process per utterance. Pause and resume suspend the child.
pub struct ProcessSpeechEngine {
    program: String,
    child: Mutex<Option<Child>>,
}

impl ProcessSpeechEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: Mutex::new(None),
        }
    }

    fn child(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn signal(&self, action: &str, signal: Signal) -> Result<(), SpeechError> {
        let mut guard = self.child();
        let Some(child) = guard.as_mut() else {
            return Ok(());
        };
        if matches!(child.try_wait(), Ok(Some(_))) {
            *guard = None;
            return Ok(());
        }
        engine_debug!("Speech {} (pid {})", action, child.id());
        send_signal(child.id(), signal)
    }
}

impl SpeechEngine for ProcessSpeechEngine {
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut guard = self.child();
        if let Some(previous) = guard.take() {
            reap(previous);
        }
        let child = Command::new(&self.program)
            .arg("-s")
            .arg(words_per_minute(utterance.rate).to_string())
            .arg("-v")
            .arg(voice_for(&utterance.lang))
            .arg("--")
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| spawn_error(&self.program, err))?;
        engine_debug!(
            "Started {} (pid {}) for {} chars",
            self.program,
            child.id(),
            utterance.text.chars().count()
        );
        *guard = Some(child);
        Ok(())
    }

    fn pause(&self) -> Result<(), SpeechError> {
        self.signal("pause", Signal::Stop)
    }

    fn resume(&self) -> Result<(), SpeechError> {
        self.signal("resume", Signal::Continue)
    }

    fn stop(&self) -> Result<(), SpeechError> {
        if let Some(child) = self.child().take() {
            reap(child);
        }
        Ok(())
    }
}

impl Drop for ProcessSpeechEngine {
    fn drop(&mut self) {
        if let Some(child) = self.child().take() {
            reap(child);
        }
    }
}

/// espeak-ng takes a speed in words per minute; rate 1.0 is its default.
pub fn words_per_minute(rate: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * rate)
        .round()
        .clamp(MIN_WORDS_PER_MINUTE, MAX_WORDS_PER_MINUTE) as u32
}

/// BCP 47 tags such as `en-US` map to espeak voice names such as `en-us`.
pub fn voice_for(lang: &str) -> String {
    lang.trim().to_ascii_lowercase()
}

fn spawn_error(program: &str, err: io::Error) -> SpeechError {
    if err.kind() == io::ErrorKind::NotFound {
        SpeechError::Unavailable(format!("{program} is not installed"))
    } else {
        SpeechError::Engine(format!("could not start {program}: {err}"))
    }
}

fn reap(mut child: Child) {
    // A stopped child must be continued before it can act on the kill.
    let _ = send_signal(child.id(), Signal::Continue);
    if let Err(err) = child.kill() {
        if err.kind() != io::ErrorKind::InvalidInput {
            engine_warn!("Could not stop speech process {}: {}", child.id(), err);
        }
    }
    let _ = child.wait();
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    Stop,
    Continue,
}

#[cfg(unix)]
fn send_signal(pid: u32, signal: Signal) -> Result<(), SpeechError> {
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::Pid;

    let signal = match signal {
        Signal::Stop => NixSignal::SIGSTOP,
        Signal::Continue => NixSignal::SIGCONT,
    };
    kill(Pid::from_raw(pid as i32), signal)
        .map_err(|err| SpeechError::Engine(format!("failed to send {signal:?}: {err}")))
}

#[cfg(not(unix))]
fn send_signal(_pid: u32, _signal: Signal) -> Result<(), SpeechError> {
    Err(SpeechError::Unavailable(
        "pause and resume need a Unix host".to_string(),
    ))
}
