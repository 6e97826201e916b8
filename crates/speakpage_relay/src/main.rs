//! `speakpage-relay`: HTTP relay between the SpeakPage reader and the AI
//! upstreams.
use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, engine_warn, LogDestination};
use log::LevelFilter;
use speakpage_relay::{
    serve, RelayConfig, RelayState, UpstreamEndpoint, DEFAULT_BIND, DEFAULT_PROMPT_MODEL,
    DEFAULT_PROMPT_URL, DEFAULT_SUMMARIZER_URL, DEFAULT_TRANSLATOR_URL,
};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "speakpage-relay")]
#[command(about = "Forwards SpeakPage AI requests to upstream services")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "RELAY_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    #[arg(long, env = "SUMMARIZER_URL", default_value = DEFAULT_SUMMARIZER_URL)]
    summarizer_url: String,

    #[arg(long, env = "SUMMARIZER_KEY", hide_env_values = true)]
    summarizer_key: Option<String>,

    #[arg(long, env = "TRANSLATOR_URL", default_value = DEFAULT_TRANSLATOR_URL)]
    translator_url: String,

    #[arg(long, env = "TRANSLATOR_KEY", hide_env_values = true)]
    translator_key: Option<String>,

    #[arg(long, env = "PROMPT_URL", default_value = DEFAULT_PROMPT_URL)]
    prompt_url: String,

    #[arg(long, env = "PROMPT_KEY", hide_env_values = true)]
    prompt_key: Option<String>,

    #[arg(long, env = "PROMPT_MODEL", default_value = DEFAULT_PROMPT_MODEL)]
    prompt_model: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RELAY_LOG", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> RelayConfig {
        RelayConfig {
            bind: self.bind,
            summarizer: UpstreamEndpoint::new(self.summarizer_url, self.summarizer_key),
            translator: UpstreamEndpoint::new(self.translator_url, self.translator_key),
            prompt: UpstreamEndpoint::new(self.prompt_url, self.prompt_key),
            prompt_model: self.prompt_model,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    engine_logging::initialize(LogDestination::Terminal, level);

    let config = cli.into_config();
    for (name, endpoint) in [
        ("summarizer", &config.summarizer),
        ("translator", &config.translator),
        ("prompt", &config.prompt),
    ] {
        if endpoint.api_key.is_none() {
            engine_warn!("No api key for {} upstream; its action will fail", name);
        }
    }

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    let state = RelayState::new(config).context("building HTTP client")?;

    serve(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        engine_info!("Shutting down relay");
    })
    .await
    .context("relay server failed")?;
    Ok(())
}
