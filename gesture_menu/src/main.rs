//! gesture_menu — interactive and headless entry point.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gesture_menu::app::{self, Outcome};
use gesture_menu::replay::{load_script, replay};
use menu_nav::NavConfig;

#[derive(Parser)]
#[command(name = "gesture_menu")]
#[command(version)]
#[command(about = "Navigate menus with hand gestures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Screen configuration (TOML); the built-in yoga menus when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the simulation window on one screen
    Sim {
        #[arg(short, long, default_value = "main")]
        screen: String,
    },

    /// Run a JSON-lines input script headlessly and print the events
    Replay {
        script: PathBuf,
        #[arg(short, long, default_value = "main")]
        screen: String,
    },

    /// List configured screens and training routines
    Screens,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sim { screen } => sim(&config, &screen),
        Commands::Replay { script, screen } => run_replay(&config, &script, &screen),
        Commands::Screens => list(&config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<NavConfig> {
    match path {
        Some(p) => NavConfig::load(p).with_context(|| format!("loading {}", p.display())),
        None    => Ok(NavConfig::builtin()),
    }
}

fn sim(config: &NavConfig, screen: &str) -> anyhow::Result<()> {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           Gesture Menu — hands-free menu navigation          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let outcome = app::run(config, screen).with_context(|| format!("screen '{}'", screen))?;
    match outcome {
        Outcome::Confirmed { index, item } => println!("  Confirmed #{}: {}", index, item),
        Outcome::Back                      => println!("  Back"),
        Outcome::Closed                    => println!("  Closed"),
    }
    Ok(())
}

fn run_replay(config: &NavConfig, script: &Path, screen: &str) -> anyhow::Result<()> {
    let steps = load_script(script)?;
    let mut nav = config
        .screen(screen)?
        .navigator()
        .with_context(|| format!("building screen '{}'", screen))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for emitted in replay(&mut nav, &steps) {
        serde_json::to_writer(&mut out, &emitted)?;
        writeln!(out)?;
    }
    Ok(())
}

fn list(config: &NavConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (name, screen) in &config.screens {
        writeln!(
            out,
            "{:<12} {:<9} {:>2} items  cooldown {} ms{}",
            name,
            format!("{:?}", screen.layout).to_lowercase(),
            screen.items.len(),
            screen.cooldown().as_millis(),
            if screen.swipe { "  swipe" } else { "" },
        )?;
    }
    if !config.routines.is_empty() {
        writeln!(out)?;
        for (name, poses) in &config.routines {
            writeln!(out, "{}: {}", name, poses.join(", "))?;
        }
    }
    Ok(())
}
