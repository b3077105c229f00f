//! octogen CLI - generate typed C# GitHub API clients from an OpenAPI schema.

use clap::Parser;

mod commands;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let result = match cli.completions {
        Some(shell) => commands::completions::run(shell),
        None => commands::generate::run(&cli),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
