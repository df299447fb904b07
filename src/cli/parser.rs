use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rcheckin
/// Attendance check-in form with a daily xlsx ledger
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance check-in: one xlsx ledger per day, duplicate-guarded, with an admin web surface",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the directory holding the daily ledgers
    #[arg(global = true, long = "logs-dir", value_name = "DIR")]
    pub logs_dir: Option<String>,

    /// Override the settings document path
    #[arg(global = true, long = "settings", value_name = "FILE")]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file, the logs directory and default settings
    Init,

    /// Run the HTTP server (form + admin pages)
    Serve {
        /// Address to listen on (overrides `bind` in the config)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Check in from the terminal, for today
    Submit {
        /// First name
        name: String,
        /// Last name
        lastname: String,
        /// Answer to question 1 (ignored when disabled)
        #[arg(long = "q1", default_value = "")]
        question1: String,
        /// Answer to question 2 (ignored when disabled)
        #[arg(long = "q2", default_value = "")]
        question2: String,
    },

    /// Print a day's ledger
    Logs {
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },

    /// Export a day's ledger to a file
    Export {
        /// Export format
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete a day's ledger
    Clear {
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// View or edit the form settings document
    Settings {
        #[arg(long = "print", help = "Print the current settings")]
        print: bool,

        /// Set a key, e.g. --set question_1_label=Teléfono (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Turn a boolean key on (repeatable)
        #[arg(long = "enable", value_name = "KEY")]
        enable: Vec<String>,

        /// Turn a boolean key off (repeatable)
        #[arg(long = "disable", value_name = "KEY")]
        disable: Vec<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },
}
