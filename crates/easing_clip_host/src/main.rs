// SPDX-License-Identifier: MIT OR Apache-2.0
//! `easing_clip_host` - stand-in host for the easing context menu.
//!
//! Loads a session file (objects, midpoint links, tracks and script easings),
//! opens the easing menu for one object/track, runs the chosen command and
//! prints the resulting values and clipboard.
//!
//! ## Architecture
//!
//! The session document implements the engine's host traits directly; a
//! sandbox adds the undo journal, an in-memory clipboard and a console menu
//! surface that answers with the command given on the command line.

mod document;
mod error;
mod history;
mod sandbox;
mod scripts;
mod session;

use clap::Parser;
use easing_clip::{
    collect_values, Chain, EasingCommand, EasingError, EasingMenu, EasingResolver, FormatSettings,
    FormattedValueSpan, ObjectIndex, ObjectStore, TrackIndex, ValueShape,
};
use error::{HostError, Result};
use sandbox::Sandbox;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "easing_clip_host")]
#[command(about = "Open the easing copy/paste menu on an object of a session file")]
#[command(version)]
struct Cli {
    /// Session file (RON)
    session: PathBuf,

    /// Object to open the menu on
    #[arg(long, default_value = "0")]
    object: usize,

    /// Track of the object
    #[arg(long, default_value = "0")]
    track: usize,

    /// Clipboard text before the menu opens
    #[arg(long)]
    clipboard: Option<String>,

    /// Identifier of the command to run, e.g. `paste.all` or `flip.entire`
    #[arg(long)]
    choose: Option<String>,

    /// Display options file (RON), overriding the session's
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Undo the command again after running it
    #[arg(long)]
    undo: bool,

    /// Write the edited document back to the session file
    #[arg(long)]
    save: bool,

    /// Write a sample session to the session path and exit
    #[arg(long)]
    init: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Default filter directives for the engine and this binary
fn log_directives(verbose: bool) -> [String; 2] {
    let level = if verbose { "debug" } else { "info" };
    [format!("easing_clip={level}"), format!("{}={level}", env!("CARGO_CRATE_NAME"))]
}

fn init_tracing(verbose: bool) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in log_directives(verbose) {
        match directive.parse::<Directive>() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive {directive}: {e}"),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Current values of the chain around `object`, as displayed numbers
fn describe_values(
    resolver: &mut EasingResolver<scripts::ScriptTable>,
    store: &impl ObjectStore,
    object: ObjectIndex,
    track: TrackIndex,
) -> Result<String> {
    let chain = Chain::collect(store, object)?;
    let state = store
        .read_track(chain.leader(), track)
        .ok_or(EasingError::TrackNotFound { object, track })?;
    let scale = store.track_scale(chain.leader(), track).unwrap_or_default();
    let easing = resolver.resolve(state.mode);
    let shape = ValueShape::classify(state.mode, &easing.spec, chain.len());
    let values = collect_values(store, &chain, track, shape)?;
    let span = FormattedValueSpan::from_internal(&values, scale.denominator);
    Ok(format!(
        "{} ({:?}): {}",
        easing.name,
        shape,
        span.to_string(scale.precision, false, false, true)
    ))
}

fn run(cli: Cli) -> Result<()> {
    if cli.init {
        Session::sample()?.save(&cli.session)?;
        println!("Wrote sample session to {}", cli.session.display());
        return Ok(());
    }

    let session = Session::load(&cli.session)?;
    let settings = match &cli.settings {
        Some(path) => FormatSettings::load(path)?,
        None => session.format_settings(),
    };
    let choice = cli
        .choose
        .as_deref()
        .map(|id| {
            EasingCommand::from_id(id).ok_or_else(|| HostError::UnknownCommand(id.to_string()))
        })
        .transpose()?;

    let object = ObjectIndex(cli.object);
    let track = TrackIndex(cli.track);
    if session.document.get(object).is_none() {
        return Err(HostError::ObjectNotFound(object));
    }

    let mut resolver = EasingResolver::new(session.scripts.clone());
    let menu = EasingMenu::new(settings);
    let mut sandbox = Sandbox::new(session.document.clone());
    sandbox.clipboard = cli.clipboard.clone();
    sandbox.choice = choice;
    sandbox.echo_menu = true;

    println!("{}", describe_values(&mut resolver, &sandbox, object, track)?);
    match menu.open(&mut resolver, &mut sandbox, object, track)? {
        Some(command) => {
            println!("Ran {}", command.id());
            println!("{}", describe_values(&mut resolver, &sandbox, object, track)?);
        }
        None if sandbox.last_menu.is_empty() => println!("No easing menu for this track"),
        None => {}
    }

    tracing::debug!(
        "Undo journal holds {} entries, {} bytes",
        sandbox.history.depth(),
        sandbox.history.memory_used()
    );
    if cli.undo {
        if sandbox.history.can_undo() {
            sandbox.undo()?;
            println!("Undone");
            println!("{}", describe_values(&mut resolver, &sandbox, object, track)?);
        } else {
            println!("Nothing to undo");
        }
    }

    if let Some(text) = &sandbox.clipboard {
        println!("Clipboard: {text}");
    }

    if cli.save {
        let session = Session {
            document: sandbox.document,
            ..session
        };
        session.save(&cli.session)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("Starting easing_clip_host v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        tracing::error!("easing_clip_host failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directives_match_own_target() {
        let [engine, host] = log_directives(true);
        assert_eq!(engine, "easing_clip=debug");
        assert_eq!(host, "easing_clip_host=debug");

        let target = module_path!();
        assert!(target.starts_with("easing_clip_host"), "{target}");
        assert!(host.parse::<Directive>().is_ok());
    }
}
