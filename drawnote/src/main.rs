#![warn(clippy::pedantic)]

mod scene;
mod script;

use anyhow::Result as AnyResult;
use drawnote_core::{config::SessionConfig, Session};

/// Name of the scene node all stroke visuals are parented under.
const DRAWINGS_PARENT: &str = "Drawings";

const USAGE: &str = "usage: drawnote [--config <settings.toml>] <script.toml>";

struct Args {
    config: Option<std::path::PathBuf>,
    script: std::path::PathBuf,
}
impl Args {
    fn parse() -> AnyResult<Self> {
        // Paths are OSStrings, let the system handle character encoding restrictions.
        let mut args = std::env::args_os().skip(1);
        let mut config = None;
        let mut script = None;
        while let Some(arg) = args.next() {
            if arg == "--config" {
                let path = args.next().ok_or_else(|| anyhow::anyhow!(USAGE))?;
                config = Some(path.into());
            } else if script.is_none() {
                script = Some(arg.into());
            } else {
                anyhow::bail!(USAGE);
            }
        }
        Ok(Self {
            config,
            script: script.ok_or_else(|| anyhow::anyhow!(USAGE))?,
        })
    }
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let args = Args::parse()?;
    let config = match &args.config {
        // Explicitly requested, so failing to read it is an error rather than a fallback.
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::load_user(),
    };

    let script: AnyResult<script::Script> = try_block::try_block! {
        let string = std::fs::read_to_string(&args.script)?;
        let script = script::Script::from_toml(&string)?;
        Ok(script)
    };
    let script = match script {
        Ok(script) => script,
        Err(e) => {
            log::error!("failed to open script {:?}: {e:#}", args.script);
            return Err(e);
        }
    };

    let mut session = Session::new(
        &config,
        scene::Scene::new(DRAWINGS_PARENT),
        scene::LogHud::default(),
    );
    session.start();
    let summary = script::replay(&script, &mut session);

    log::info!(
        "replayed {} ticks, drew on {}, {} commands ({} failed)",
        summary.ticks,
        summary.drawn,
        summary.commands,
        summary.failed_commands
    );
    for stroke in session.host().iter() {
        log::info!(
            "{}/{}: {} points, {}",
            stroke.parent,
            stroke.name,
            stroke.trail.len(),
            if stroke.active { "visible" } else { "undone" }
        );
    }
    let state = session.state();
    log::info!(
        "final state: {} mode, drawing {}, slot {}, {} of {} strokes visible",
        state.mode,
        state.drawing,
        state.current_index,
        session.strokes().active_count(),
        session.strokes().len()
    );
    Ok(())
}
