use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for attendlog
/// Library attendance: student registry, check-in/check-out and reports on SQLite
#[derive(Parser)]
#[command(
    name = "attendlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Library attendance tracker: check students in and out and report on visits using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register, list and look up students
    Student {
        #[command(subcommand)]
        action: StudentCommand,
    },

    /// Open a visit for a registered student
    Checkin {
        /// External student identifier (e.g. 2024-0001)
        student_id: String,

        /// Study, Research, "Borrow Books", "Used Computer" or "Library Card Application"
        purpose: String,
    },

    /// Close an open visit
    Checkout {
        /// Visit id printed by `checkin` or `active`
        visit_id: i64,
    },

    /// List visits that are still open
    Active,

    /// Show the dashboard statistics
    Stats {
        #[arg(long, help = "Trailing window for daily visits (default from config)")]
        days: Option<u32>,

        #[arg(long, help = "Trailing window for monthly trends (default from config)")]
        months: Option<u32>,
    },

    /// Export the activity report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Serve the HTTP API
    Serve {
        #[arg(long, help = "Bind address (default from config)")]
        host: Option<String>,

        #[arg(long, help = "Bind port (default from config)")]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Register a new student
    Add {
        student_id: String,

        #[arg(long = "first")]
        first_name: String,

        #[arg(long = "last")]
        last_name: String,

        #[arg(long = "middle")]
        middle_name: Option<String>,

        #[arg(long)]
        course: String,

        #[arg(long = "year", default_value_t = 1)]
        year_level: i64,

        #[arg(long, default_value = "")]
        section: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// List every registered student
    List,

    /// Search by exact id or by name fragment
    Search { term: String },

    /// Show a student with recent visits
    Show {
        student_id: String,

        #[arg(long, help = "Number of recent visits to show (default from config)")]
        limit: Option<u32>,
    },

    /// Set the profile image reference of a student
    Image { student_id: String, image: String },
}
