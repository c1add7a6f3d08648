use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if cli.verbose {
                "fwbundle=debug"
            } else {
                "fwbundle=info"
            })
        }))
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.as_ref();
    let active_dir = cli.active_dir.as_ref();

    match cli.command {
        cli::Command::App(cmd) => cli::bundles::run_app(data_dir, active_dir, cmd),
        cli::Command::Image(cmd) => cli::bundles::run_image(data_dir, active_dir, cmd),
        cli::Command::Clear => cli::clear::run(data_dir, active_dir),
        cli::Command::Status => cli::status::run(data_dir, active_dir),
        cli::Command::Verify { json } => cli::verify::run(data_dir, active_dir, json),
        cli::Command::Config(cmd) => cli::config::run(data_dir, active_dir, cmd),
    }
}
