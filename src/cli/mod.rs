pub mod commands;
pub mod context;
pub mod logging;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Protect the lfcgeo squad dataset at rest.
#[derive(Parser, Debug)]
#[command(name = "lfcgeo-vault", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to alternative config file (default: lfcgeo.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new key and save it to the key file
    Keygen {
        /// Where to write the key (default: [data].key_file)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the key to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
        /// Replace an existing key file
        #[arg(long)]
        force: bool,
    },

    /// Encrypt a file into its .enc sibling
    Encrypt {
        /// File to encrypt
        file: PathBuf,
        #[command(flatten)]
        key: KeySourceArgs,
    },

    /// Decrypt a .enc file
    Decrypt {
        /// Encrypted file
        file: PathBuf,
        /// Write plaintext here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        key: KeySourceArgs,
    },

    /// Generate a key, encrypt the dataset, and verify the round trip
    Prepare {
        /// Plaintext dataset (default: [data].source)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Where to write the new key (default: [data].key_file)
        #[arg(long)]
        key_file: Option<PathBuf>,
        /// Keep the decrypted copy used for verification
        #[arg(long)]
        keep_decrypted: bool,
        /// Print the new key after saving it
        #[arg(long)]
        show_key: bool,
        /// Replace an existing key file
        #[arg(long)]
        force: bool,
    },

    /// Check that an encrypted file decrypts to a given plaintext
    Verify {
        /// Encrypted file
        encrypted: PathBuf,
        /// Expected plaintext
        plaintext: PathBuf,
        #[command(flatten)]
        key: KeySourceArgs,
    },
}

/// Where to read the key from. Without flags, the sources configured in
/// `[secrets]` and `[data].key_file` are tried in turn.
#[derive(Args, Debug, Default)]
pub struct KeySourceArgs {
    /// Read the key from this file
    #[arg(long, group = "key_source")]
    pub key_file: Option<PathBuf>,

    /// Read the key from this environment variable
    #[arg(long, group = "key_source")]
    pub key_env: Option<String>,

    /// Read the key from this TOML secrets file
    #[arg(long, group = "key_source")]
    pub secrets: Option<PathBuf>,
}
