//! `speakpage`: a terminal popup for the SpeakPage reader. It opens one page
//! as tab 1 and lets the user summarize, question, translate or listen to it.
mod notifier;
mod speech;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use speakpage_core::TabId;
use speakpage_engine::{
    ArticleExtractor, Dispatcher, EngineConfig, EngineHandle, FetchSettings, HttpPageSource,
    HttpRelayClient, SpeechController, DEFAULT_RELAY_URL, DEFAULT_SPEECH_LANG,
    MIN_SIGNIFICANT_LENGTH,
};

use notifier::TerminalNotifier;
use speech::{ProcessSpeechEngine, DEFAULT_SPEECH_PROGRAM};
use terminal::EffectRunner;

const TAB: TabId = 1;

#[derive(Parser, Debug)]
#[command(name = "speakpage")]
#[command(about = "Read, summarize and question web articles from the terminal")]
#[command(version)]
struct Cli {
    /// Page to open
    url: String,

    /// Relay endpoint that forwards AI requests
    #[arg(long, env = "SPEAKPAGE_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    relay_url: String,

    /// Speech language tag
    #[arg(long, env = "SPEAKPAGE_LANG", default_value = DEFAULT_SPEECH_LANG)]
    lang: String,

    /// Speech synthesizer executable
    #[arg(long, env = "SPEAKPAGE_SPEECH_PROGRAM", default_value = DEFAULT_SPEECH_PROGRAM)]
    speech_program: String,

    /// Minimum number of extracted characters worth reading or sending
    #[arg(long, default_value_t = MIN_SIGNIFICANT_LENGTH)]
    min_text_len: usize,

    /// Log file
    #[arg(long, env = "SPEAKPAGE_LOG_FILE", default_value = "speakpage.log")]
    log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "SPEAKPAGE_LOG", default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // The terminal belongs to the popup, so logs go to a file.
    let level = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    engine_logging::initialize(LogDestination::File(cli.log_file.clone()), level);

    let config = EngineConfig {
        relay_url: cli.relay_url,
        speech_lang: cli.lang,
        min_text_len: cli.min_text_len,
        ..EngineConfig::default()
    };
    engine_info!("Opening {} with relay {}", cli.url, config.relay_url);

    let pages = HttpPageSource::new(FetchSettings::default()).context("building page fetcher")?;
    pages
        .open(TAB, cli.url.clone())
        .with_context(|| format!("opening {}", cli.url))?;
    let relay = HttpRelayClient::new(config.relay_settings())
        .context("building relay client")?
        .with_notifier(Arc::new(TerminalNotifier));
    let speech = Arc::new(ProcessSpeechEngine::new(cli.speech_program));

    let dispatcher = Dispatcher::new(
        Arc::new(pages),
        Arc::new(ArticleExtractor::new(config.extract_settings())),
        Arc::new(relay),
        SpeechController::new(speech.clone(), config.speech_lang.clone()),
        config.dispatch_settings(),
    );
    let engine = EngineHandle::new(dispatcher).context("starting engine runtime")?;

    terminal::run(EffectRunner::new(engine, speech), TAB)
}
