//! LazyKarabiner - keymap generator for Karabiner-Elements
//!
//! Builds the layered keymap and writes it as a complex-modification JSON
//! document. Logs go to stderr so stdout stays pure JSON.

use clap::{Parser, Subcommand};
use lazykarabiner::cli::{
    ExitCode, GenerateArgs, KeycodesArgs, LayersArgs, ValidateArgs,
};
use lazykarabiner::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// LazyKarabiner - keymap generator for Karabiner-Elements
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the complex-modification JSON document
    Generate(GenerateArgs),
    /// List layers with their activation policy and guards
    Layers(LayersArgs),
    /// Build the keymap and check it for ordering and flag mistakes
    Validate(ValidateArgs),
    /// List or search the key code vocabulary
    Keycodes(KeycodesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Generate(args) => args.execute(),
        Command::Layers(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Keycodes(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            eprintln!("{APP_BINARY_NAME}: {err}");
            err.exit_code.into()
        }
    }
}
