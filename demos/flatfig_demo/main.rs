//! # flatfig demo application
//!
//! A small CLI standing in for a desktop uploader's preference handling. It
//! exists to exercise flatfig by hand.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flatfig_demo -- show
//! cargo run --example flatfig_demo -- push https://puush.me/abc
//! cargo run --example flatfig_demo -- config list
//! RUST_LOG=flatfig=debug cargo run --example flatfig_demo -- show
//! ```
//!
//! `show` seeds every setting it reads, so the first run writes a complete
//! file with defaults. Pass `--store path.cfg` to use a scratch file instead
//! of the platform config directory.

mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flatfig::{ConfigArgs, Flatfig, FlatfigBuilder, SearchPath};

use settings::{Settings, push_history};

/// flatfig demo — preference store of a pretend upload tool.
#[derive(Parser, Debug)]
#[command(name = "flatfig-demo")]
struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Save on every change instead of once at exit.
    #[arg(long, global = true)]
    write_through: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the typed settings, seeding defaults for missing keys.
    Show,
    /// Record an upload URL in the recent-history list.
    Push { url: String },
    /// Inspect or edit the raw file (list, get, set, unset).
    Config(ConfigArgs),
}

fn make_builder(file: Option<PathBuf>, write_through: bool) -> FlatfigBuilder {
    let builder = Flatfig::builder()
        .app_name("flatfig-demo")
        .write_on_change(write_through);

    match file {
        Some(path) => {
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "flatfig-demo.cfg".into());
            builder.location(SearchPath::Path(dir)).file_name(&name)
        }
        None => builder,
    }
}

fn fail(context: &str, e: flatfig::FlatfigError) -> ! {
    eprintln!("{context}:\n{e}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show => {
            let mut store = make_builder(cli.store, cli.write_through)
                .open()
                .unwrap_or_else(|e| fail("Failed to open config", e));
            let settings = Settings::read(&mut store).unwrap_or_else(|e| fail("Bad setting", e));
            println!("{settings:#?}");
            if let Err(e) = store.save_if_dirty() {
                fail("Failed to save config", e);
            }
        }
        Commands::Push { url } => {
            let mut store = make_builder(cli.store, cli.write_through)
                .open()
                .unwrap_or_else(|e| fail("Failed to open config", e));
            let history = push_history(&mut store, &url).unwrap_or_else(|e| fail("Bad setting", e));
            for (i, entry) in history.iter().enumerate() {
                println!("{i}: {entry}");
            }
            // Unsaved changes are written when `store` is dropped.
        }
        Commands::Config(args) => {
            let file = args.file.clone().or(cli.store);
            let action = args.into_action();
            make_builder(file, cli.write_through)
                .handle_and_print(&action)
                .unwrap_or_else(|e| fail("Config error", e));
        }
    }
}
