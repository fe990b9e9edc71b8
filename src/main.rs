use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use macroquad::prelude::{BLACK, Conf, KeyCode, clear_background, is_key_pressed, next_frame};
use tracing::info;

use notefall::audio::{PlaybackSynchronizer, SyncSettings, open_device};
use notefall::config::{CONFIG_FILE, GameConfig};
use notefall::game::GameSession;
use notefall::input::{KeyBindings, KeyboardInput};
use notefall::library::find_scores;
use notefall::render::{HUD_HEIGHT, MacroquadSurface, draw_hud};
use notefall::score::{Score, ScoreLoadError};
use notefall::traits::time::SystemTimeProvider;
use notefall::util::{UserError, init_logging};

/// A falling-note rhythm game for standard MIDI files.
#[derive(Debug, Parser)]
#[command(name = "notefall", version, about)]
struct Cli {
    /// MIDI file to play.
    score: Option<PathBuf>,

    /// Configuration file.
    #[arg(long, env = "NOTEFALL_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Directory to look for scores in (overrides the config file).
    #[arg(long)]
    songs: Option<PathBuf>,

    /// List the available scores and exit.
    #[arg(long)]
    list: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Also write logs to a daily rotating file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Everything the game loop needs, prepared before the window opens.
struct Prepared {
    config: GameConfig,
    session: GameSession,
    input: KeyboardInput,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_dir.as_deref(), cli.verbose) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    match prepare(&cli) {
        Ok(Some(prepared)) => {
            let conf = window_conf(&prepared.config);
            macroquad::Window::from_config(conf, game_loop(prepared));
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: "notefall".to_owned(),
        window_width: i32::try_from(config.window_width).unwrap_or(i32::MAX),
        window_height: i32::try_from(config.window_height).unwrap_or(i32::MAX),
        fullscreen: false,
        ..Default::default()
    }
}

fn songs_dir(cli: &Cli, config: &GameConfig) -> PathBuf {
    cli.songs
        .clone()
        .or_else(|| config.songs_dir.clone())
        .unwrap_or_else(|| PathBuf::from("songs"))
}

/// Load config and score and build the session. `None` means there is
/// nothing to play (for example after `--list`).
fn prepare(cli: &Cli) -> Result<Option<Prepared>> {
    let config = GameConfig::load_from(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(UserError::config_error(&cli.config, &e.to_string())))?;

    let songs = songs_dir(cli, &config);
    if cli.list {
        list_scores(&songs);
        return Ok(None);
    }

    let Some(path) = cli.score.as_deref() else {
        anyhow::bail!(UserError::no_score_selected());
    };
    let score = load_score(path, &songs)?;

    let lane_count = config.lane_count()?;
    let events = score.note_events(lane_count);
    info!(
        notes = events.len(),
        bpm = score.initial_bpm().unwrap_or(120.0),
        "Starting game"
    );

    let device = open_device(&score, config.midi_output_port.as_deref());
    let playback = PlaybackSynchronizer::new(device, SyncSettings::from_config(&config));
    let session = GameSession::new(&config, &events, playback)?;
    let input = KeyboardInput::new(KeyBindings::from_names(&config.key_bindings)?);

    Ok(Some(Prepared {
        config,
        session,
        input,
    }))
}

fn load_score(path: &Path, songs: &Path) -> Result<Score> {
    match Score::load(path) {
        Ok(score) => Ok(score),
        Err(ScoreLoadError::NotFound(_)) => {
            let available = find_scores(songs);
            anyhow::bail!(UserError::score_not_found(path, &available))
        }
        Err(ScoreLoadError::Decode(e)) => {
            anyhow::bail!(UserError::score_decode_error(path, &e.to_string()))
        }
    }
}

fn list_scores(songs: &Path) {
    let scores = find_scores(songs);
    if scores.is_empty() {
        println!("No scores found in {}", songs.display());
    }
    for score in scores {
        println!("{}", score.display());
    }
}

async fn game_loop(prepared: Prepared) {
    let Prepared {
        config,
        mut session,
        mut input,
    } = prepared;
    let time = SystemTimeProvider::new();
    let mut hud = MacroquadSurface::new(0.0, 0.0);
    let mut field = MacroquadSurface::new(0.0, HUD_HEIGHT);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("Quit requested");
            break;
        }

        clear_background(BLACK);
        session.step(&mut input, &time, &mut field);
        draw_hud(&mut hud, session.score(), session.playback().current_elapsed());

        next_frame().await;
    }

    session.shutdown();
    info!(score = session.score().total(), lanes = config.lane_count, "Game closed");
}
