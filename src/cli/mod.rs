pub mod bundles;
pub mod clear;
pub mod config;
pub mod host;
pub mod status;
pub mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "fwbundle",
    about = "Install, activate and verify firmware image bundles",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Override the data directory (default: ~/.local/share/fwbundle)
    #[arg(long, env = "FWBUNDLE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the directory active images are published to
    #[arg(long, env = "FWBUNDLE_ACTIVE_DIR", global = true)]
    pub active_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage app-layer bundles (the ones that can be activated)
    #[command(subcommand)]
    App(AppSubcommand),

    /// Manage image library bundles
    #[command(subcommand)]
    Image(ImageSubcommand),

    /// Unpublish the active bundle and delete its images and fingerprints
    Clear,

    /// Show the active bundle and store locations
    Status,

    /// Check every active image against its fingerprint
    Verify {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage global configuration
    #[command(subcommand)]
    Config(ConfigSubcommand),
}

#[derive(Debug, Subcommand)]
pub enum AppSubcommand {
    /// Install an app-layer bundle from a zip archive
    Add {
        /// Archive path; the bundle is named after the file without its extension
        archive: PathBuf,
    },

    /// List installed app-layer bundles
    List {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the images in an app-layer bundle
    Info {
        /// Name of the bundle
        name: String,
    },

    /// Publish a bundle's images to the active directory
    Activate {
        /// Name of the bundle
        name: String,
    },

    /// Delete an app-layer bundle, clearing it first if active
    Remove {
        /// Name of the bundle
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ImageSubcommand {
    /// Install an image bundle from a zip archive
    Add {
        /// Archive path; the bundle is named after the file without its extension
        archive: PathBuf,
    },

    /// List installed image bundles
    List {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the images in an image bundle
    Info {
        /// Name of the bundle
        name: String,
    },

    /// Delete an image bundle
    Remove {
        /// Name of the bundle
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (active_dir, fingerprint)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },
}
