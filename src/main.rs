use clap::Parser;

use haplomap::cli;
use haplomap::commands;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = cli::check_token_count(std::env::args().len()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let args = cli::Args::parse();

    let result = args.validate().and_then(|_| commands::render::run(&args));

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
