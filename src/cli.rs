//! CLI argument parsing via clap.

use backdrop::store::Table;
use clap::{Parser, Subcommand};

/// Resolve background and splash images from color and theme names.
#[derive(Debug, Parser)]
#[command(name = "backdrop", version)]
pub struct Args {
    /// Path to config file (default: ./backdrop.toml or ~/.config/backdrop/backdrop.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// State file to use instead of the configured one.
    #[arg(long = "state", global = true, value_name = "PATH")]
    pub state: Option<String>,

    /// Skip live image search and use generated placeholders only.
    #[arg(long = "offline", global = true)]
    pub offline: bool,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve background candidates for a color and remember the color.
    Color {
        name: String,
        /// Maximum number of candidates.
        #[arg(long = "max")]
        max: Option<usize>,
        /// Save the Nth candidate (1-based) as the background image.
        #[arg(long = "pick", value_name = "N")]
        pick: Option<usize>,
    },
    /// Remember a splash theme and resolve splash candidates for it.
    Splash {
        name: String,
        /// Maximum number of candidates.
        #[arg(long = "max")]
        max: Option<usize>,
        /// Save the Nth candidate (1-based) as the splash image.
        #[arg(long = "pick", value_name = "N")]
        pick: Option<usize>,
    },
    /// Show what the next launch would display.
    Show,
    /// Print the resolved hex and readable foreground for a color name.
    Contrast { name: String },
    /// Forget every saved selection. Catalogs are kept.
    Reset,
    /// Inspect and edit stored rows directly.
    Rows {
        #[command(subcommand)]
        command: RowsCommand,
    },
    /// Write the default config file to ~/.config/backdrop/backdrop.toml.
    Init {
        /// Back up and overwrite an existing config.
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RowsCommand {
    /// List rows of a table (colors, splashes, backgrounds).
    List {
        table: Table,
        /// Only active (or current) rows.
        #[arg(long = "active")]
        active: bool,
    },
    /// Add a color option.
    AddColor { name: String },
    /// Add a splash option.
    AddSplash {
        name: String,
        #[arg(long = "url")]
        url: Option<String>,
    },
    /// Set a row's active flag (`is_current` for backgrounds).
    SetActive {
        table: Table,
        id: u64,
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Delete a row.
    Delete { table: Table, id: u64 },
}
