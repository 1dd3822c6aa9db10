mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::commands::prepare::PrepareOptions;
use cli::context::Verbosity;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let verbosity = Verbosity::from_flags(args.verbose, args.quiet);
    cli::logging::init(verbosity);

    let result = cli::context::init(args.config.as_deref(), verbosity).and_then(|()| {
        match &args.command {
            Commands::Keygen { out, stdout, force } => {
                cli::commands::keygen::execute(out.as_deref(), *stdout, *force)
            }
            Commands::Encrypt { file, key } => cli::commands::encrypt::execute(file, key),
            Commands::Decrypt { file, out, key } => {
                cli::commands::decrypt::execute(file, out.as_deref(), key)
            }
            Commands::Prepare {
                source,
                key_file,
                keep_decrypted,
                show_key,
                force,
            } => cli::commands::prepare::execute(&PrepareOptions {
                source: source.as_deref(),
                key_file: key_file.as_deref(),
                keep_decrypted: *keep_decrypted,
                show_key: *show_key,
                force: *force,
            }),
            Commands::Verify {
                encrypted,
                plaintext,
                key,
            } => cli::commands::verify::execute(encrypted, plaintext, key),
        }
    });

    if let Err(e) = result {
        tracing::debug!(
            io = e.is_io(),
            key_or_token = e.is_invalid_key_or_token(),
            "command failed"
        );
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
