//! CLI entry point for shellide.

mod app;
mod cli;

use clap::Parser;
use shellide::build_info::cli_version_text;
use shellide::config::{default_config_template, load_config, Config};

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    if args.version {
        println!("{}", cli_version_text());
        return;
    }
    if args.print_config {
        print!("{}", default_config_template());
        return;
    }

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    apply_cli_overrides(&mut config, &args);

    if let Err(e) = app::logging::init_logging(&config.logging) {
        eprintln!("warning: {e}");
    }
    tracing::info!(
        base_url = %config.backend.base_url,
        project = ?config.project.id,
        "starting terminal"
    );

    if let Err(e) = app::repl_loop::run_terminal(&config).await {
        eprintln!("error: terminal i/o failed: {e}");
        std::process::exit(1);
    }
}

/// CLI flags beat every other config source.
fn apply_cli_overrides(config: &mut Config, args: &cli::Args) {
    if let Some(url) = &args.base_url {
        config.backend.base_url = url.clone();
    }
    if let Some(id) = &args.project_id {
        config.project.id = Some(id.clone());
        config.project.name = args.project_name.clone();
    }
    if let Some(cwd) = &args.cwd {
        config.terminal.working_directory = Some(cwd.clone());
    }
    if args.no_color {
        config.display.color = false;
    }
    if args.no_banner {
        config.terminal.banner = false;
    }
}
