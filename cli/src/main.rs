//! postreminder - binary entry point and terminal session management.
//!
//! ```text
//! main() -> load config -> HttpEndpoint + SpawnDispatcher -> TerminalSession -> run_app()
//! ```
//!
//! The frame loop runs at a fixed cadence: drain input, then render. Reminder
//! creation requests run as detached tasks on the same runtime.

use anyhow::{Context, Result, bail};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use postreminder_client::{EndpointConfig, HttpEndpoint};
use postreminder_config::PostReminderConfig;
use postreminder_core::{
    Clock, Composer, ComposerOptions, Dispatch, SpawnDispatcher, SystemClock,
    postreminder_types::ComposerVariant,
};
use postreminder_tui::{HostApp, InputPump, Palette, PostEntry, draw, handle_events};

const USAGE: &str = "usage: postreminder [--variant classic|targeted] <post-id>[=<label>]...";

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than write over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: next to the config file, ~/.postreminder/logs/postreminder.log
    if let Some(config_path) = PostReminderConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("postreminder.log"));
    }

    candidates.push(
        PathBuf::from(".postreminder")
            .join("logs")
            .join("postreminder.log"),
    );

    candidates
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    variant: Option<ComposerVariant>,
    posts: Vec<PostEntry>,
}

fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut variant = None;
    let mut posts = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => bail!("{USAGE}"),
            "--variant" => {
                let raw = args.next().context("--variant needs a value")?;
                let parsed = ComposerVariant::parse(&raw)
                    .with_context(|| format!("unknown composer variant `{raw}`"))?;
                variant = Some(parsed);
            }
            _ => {
                let post = PostEntry::parse(&arg)
                    .with_context(|| format!("invalid post argument `{arg}`\n{USAGE}"))?;
                posts.push(post);
            }
        }
    }
    if posts.is_empty() {
        bail!("{USAGE}");
    }
    Ok(CliArgs { variant, posts })
}

/// Raw mode, bracketed paste and the alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnableBracketedPaste, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen, DisableBracketedPaste);
                Err(err.into())
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = parse_args(env::args().skip(1))?;

    let config = match PostReminderConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("Ignoring config at {}: {err}", err.path().display());
            PostReminderConfig::default()
        }
    };

    let endpoint = HttpEndpoint::new(&EndpointConfig {
        server_url: config.server_url(),
        plugin_id: config.plugin_id(),
        token: config.token(),
        timeout: config.timeout(),
    })?;
    tracing::info!(url = %endpoint.add_url(), "Reminder endpoint configured");

    let composer = Composer::new(
        ComposerOptions {
            variant: cli.variant.unwrap_or_else(|| config.variant()),
            initial_message: config.initial_message(),
        },
        SystemClock,
        SpawnDispatcher::on_current_runtime(endpoint),
    );
    let palette = if config.high_contrast() {
        Palette::high_contrast()
    } else {
        Palette::from_theme(&config.theme())
    };
    let mut app = HostApp::new(cli.posts, composer, palette);

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    if let Err(err) = &result {
        tracing::error!("Exiting with error: {err:?}");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_app<B, C, D>(terminal: &mut Terminal<B>, app: &mut HostApp<C, D>) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    C: Clock,
    D: Dispatch,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        match handle_events(app, &mut input) {
            Ok(true) => break Ok(()),
            Ok(false) => {}
            Err(e) => break Err(e),
        }

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
