//! unity-blender-fix: CLI that fixes Unity's Blender importer so FBX exports
//! include every animation action
//!
//! This tool is not affiliated with or endorsed by Unity Technologies.
//! It only edits the bundled importer script of Unity installs on your machine.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use unity_blender_fix::{config, elevation};

mod commands;

#[derive(Parser)]
#[command(name = "unity-blender-fix")]
#[command(about = "Fix bake_anim_use_all_actions=False in Unity's Blender importer", long_about = None)]
#[command(version)]
struct Cli {
    // `fix` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Extra directory to scan for Unity installs (repeatable)
    #[arg(long = "root", value_name = "DIR", global = true)]
    roots: Vec<PathBuf>,

    /// Restart as administrator without asking if permission errors occur
    #[arg(short, long, global = true)]
    yes: bool,

    /// Exit without waiting for Enter
    #[arg(long, global = true)]
    no_pause: bool,

    /// Print debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch every Unity installation found (default)
    Fix,

    /// List Unity installations and whether they need the fix
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let mut roots = config::candidate_roots();
    roots.extend(cli.roots);

    match cli.command.unwrap_or(Commands::Fix) {
        Commands::Fix => {
            let options = commands::fix::FixOptions {
                roots,
                yes: cli.yes,
                pause: !cli.no_pause,
                relaunch_args: std::env::args_os().skip(1).collect(),
            };
            let elevator = elevation::platform_elevator();
            commands::fix::execute(&options, elevator.as_ref())?;
        }

        Commands::List => {
            let output = commands::list::execute(&roots)?;
            println!("{}", output);
        }
    }

    Ok(())
}
