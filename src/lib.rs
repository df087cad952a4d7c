use crate::error::AppResult;
use crate::media::{CommandPlayer, MediaPlayer, NullPlayer};
use crate::service::HttpBackend;
use crate::session::ExerciseSession;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod error;
pub mod media;
pub mod repl;
pub mod service;
pub mod session;

static APPLICATION_NAME: &str = "escucha";

pub async fn build_session() -> AppResult<ExerciseSession<HttpBackend>> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;

    let backend = HttpBackend::connect(config.service().base_url(), config.service().timeout())?;

    let player: Box<dyn MediaPlayer> = match config.player().command() {
        Some(command) => Box::new(CommandPlayer::new(command)),
        None => Box::new(NullPlayer),
    };

    let session = ExerciseSession::new(backend, player)
        .with_voice(config.voice().language(), config.voice().speaker_wav());

    Ok(session)
}

fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    let session = build_session().await?;
    repl::run_repl(session).await
}
