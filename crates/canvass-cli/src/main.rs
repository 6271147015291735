use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use canvass_cli::cli::{Cli, Commands};

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install tracing subscriber");
    }

    if let Err(err) = run(&cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Layout { path, render } => commands::layout::handle(path, *render),
        Commands::Build { output } => commands::build::handle(&cli.config, output.as_deref()),
        Commands::Sensor { nodes, kind, model } => {
            commands::sensor::handle(&cli.config, nodes, kind, model.as_deref())
        }
        Commands::Powerflow { model } => commands::powerflow::handle(&cli.config, model.as_deref()),
    }
}
