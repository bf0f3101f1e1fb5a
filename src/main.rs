//! salute CLI
//!
//! Usage:
//!   salute [OPTIONS]                 Run the configured widgets (default)
//!   salute config [--show]           Validate the configuration file
//!   salute fonts [--preview <name>]  List or preview banner fonts
//!
//! Options:
//!   -c, --config <FILE>  Path to the configuration file
//!       --no-color       Disable colored output

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use salute::color::{self, Color};
use salute::config::{Config, DEFAULT_CONFIG_PATH};
use salute::{figlet, widget, Registry, RunContext};

#[derive(Parser)]
#[command(name = "salute")]
#[command(version)]
#[command(about = "A modern MOTD replacement")]
#[command(long_about = "Salute provides a replacement for MOTD. Its contents can be \
customized to show relevant information about your system.\n\n\
Widgets collect and process system information every time the utility is \
executed; they are configured through a configuration file. When no command \
is given, the widgets are run.")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and display the configuration
    Config {
        /// Display the parsed configuration
        #[arg(long)]
        show: bool,
    },
    /// List available banner fonts
    Fonts {
        /// Preview a specific font by name
        #[arg(short, long)]
        preview: Option<String>,

        /// Text to use for the font preview
        #[arg(short, long, default_value = "Salute")]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color_on = !cli.no_color;

    let outcome = match &cli.command {
        None => run_widgets(&cli, color_on).await,
        Some(Command::Config { show }) => validate_config(&cli, *show),
        Some(Command::Fonts { preview, text }) => match preview {
            Some(name) => preview_font(name, text, color_on),
            None => list_fonts(color_on),
        },
    };

    if let Err(err) = outcome {
        eprintln!(
            "{}",
            color::paint(&format!("Error: {}", err), Color::Red, color_on)
        );
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

async fn run_widgets(cli: &Cli, color_on: bool) -> CliResult {
    let config = Config::load(&cli.config)?;
    let registry = Registry::builtin();
    let ctx = Arc::new(RunContext { color: color_on });

    let message = salute::run(&config, &registry, ctx).await?;
    print!("{}", message);
    Ok(())
}

fn validate_config(cli: &Cli, show: bool) -> CliResult {
    let config = Config::load(&cli.config)?;
    let registry = Registry::builtin();

    // Same eager validation as a real run, with nothing launched.
    widget::dispatch::validate(&config.widgets, &registry)?;

    eprintln!("Configuration file is valid: {}", cli.config.display());
    eprintln!("  Found {} widget(s)", config.widgets.len());

    if show {
        println!("\nParsed configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

fn list_fonts(color_on: bool) -> CliResult {
    let fonts = figlet::available_fonts();
    eprintln!("Available fonts ({}):\n", fonts.len());

    const COLUMNS: usize = 3;
    for chunk in fonts.chunks(COLUMNS) {
        let line: Vec<String> = chunk
            .iter()
            .map(|name| color::paint(name, Color::Cyan, color_on))
            .collect();
        println!("{}", line.join("  "));
    }

    eprintln!("\nUse --preview <font-name> to preview a specific font.");
    eprintln!("Example: salute fonts --preview small");
    Ok(())
}

fn preview_font(name: &str, text: &str, color_on: bool) -> CliResult {
    let resolution = figlet::resolve(name)?;
    if !resolution.warnings.is_empty() {
        return Err(format!("font '{}' not found", name).into());
    }

    eprintln!("Font: {}", color::paint(name, Color::Cyan, color_on));
    eprintln!("Text: {}\n", text);
    for row in figlet::render(text, &resolution.font, 80) {
        println!("{}", row);
    }
    eprintln!("\nUse in config: font = \"{}\"", name);
    Ok(())
}
