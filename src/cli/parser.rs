use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rCashOffer
#[derive(Parser)]
#[command(
    name = "rcashoffer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Loyalty cash offers: visit eligibility, claims, admin review and approval notifications",
    long_about = None
)]
pub struct Cli {
    /// Override claim store path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override local visitor profile path
    #[arg(global = true, long = "profile")]
    pub profile: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the claim store, the local profile and the configuration
    Init,

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

    /// Manage the claim store (migrations, integrity checks, etc.)
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

    // ---------------------------
    // Visitor side
    // ---------------------------
    /// Record a page load and show the cash offer when eligible
    Visit {
        /// Close the offer as dismissed instead of shown
        #[arg(long = "dismiss")]
        dismiss: bool,
    },

    /// Show the local visitor profile
    Profile,

    /// Submit a cash-offer claim from this profile
    Claim {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long = "paypal")]
        paypal_email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        country: String,
    },

    /// Poll for approved claims and show the approval popup once
    Watch {
        /// Run a single reconciliation tick and exit
        #[arg(long = "once", conflicts_with = "ticks")]
        once: bool,

        /// Stop after N ticks
        #[arg(long = "ticks", value_parser = clap::value_parser!(u64).range(1..))]
        ticks: Option<u64>,
    },

    // ---------------------------
    // Admin side
    // ---------------------------
    /// List claims
    List {
        #[arg(long, short, help = "Filter by status (pending, approved, rejected, paid)")]
        status: Option<String>,
    },

    /// Show a single claim
    Show { id: String },

    /// Approve a pending claim
    Approve {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Reject a pending claim
    Reject {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark an approved claim as paid
    Paid {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Set a claim status directly (same rules as approve/reject/paid)
    SetStatus {
        id: String,
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Replace the admin notes of a claim without changing its status
    Annotate {
        id: String,
        #[arg(long)]
        notes: String,
    },

    /// Create a backup copy of the claim store
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export claims
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Only claims with this status")]
        status: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
