mod config;
mod events;
mod gui;
mod sys;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colorwheel::{Size, WheelController};
use events::SelectionForwarder;
use gui::app::{self, AppInit, AppModel};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;
use sys::server::SOCKET_PATH;

#[derive(Parser, Debug)]
#[command(name = "colorwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of sections, overriding the config file
    #[arg(short = 'n', long, global = true)]
    sections: Option<usize>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the wheel window (the default)
    Run,
    /// Rotate a running wheel to a section
    Select { index: usize },
    /// Rotate a running wheel to the next section
    Next,
    /// Rotate a running wheel to the previous section
    Prev,
    /// Write the default config file if none exists
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(cli.sections),
        Commands::Select { index } => send_command(&format!("select {}", index)),
        Commands::Next => send_command("next"),
        Commands::Prev => send_command("prev"),
        Commands::InitConfig => {
            let path = colorwheel::config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run(sections_override: Option<usize>) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let layout = app::layout_for(&config, sections_override);

    let (tx, rx) = async_channel::unbounded();

    let size = gui::WINDOW_SIZE as f64;
    let wheel = WheelController::with_config(
        Size::new(size, size),
        layout,
        SelectionForwarder::new(tx.clone()),
        config.wheel.clone(),
    )
    .with_context(|| format!("Cannot lay out a wheel with {} sections", layout.count))?;

    // Start Background Services
    sys::runtime::start_background_services(tx);

    // GTK would otherwise try to parse our subcommands.
    let app = RelmApp::new("org.colorwheel.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        wheel,
        config,
        sections_override,
        rx,
    });
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to colorwheel at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
