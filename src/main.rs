use clap::Parser;
use tracing_subscriber::filter::{Directive, EnvFilter};

mod cli;
use cli::commands::{run_find, run_inspect, run_tags, run_verify};
use cli::{log_directive, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = log_directive(cli.verbose).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect {
            file,
            json,
            depth,
            strict,
        } => run_inspect(&file, json, depth, strict),
        Commands::Verify { file, json } => run_verify(&file, json),
        Commands::Find { file, tag } => run_find(&file, &tag),
        Commands::Tags => run_tags(),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
