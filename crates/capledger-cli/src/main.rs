//! capledger CLI - Command-line interface for the equity capitalization ledger.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{
    authorize, create_class, create_holder, holdings, init, list, reconcile, record, summary,
    table, verify,
};

#[derive(Parser)]
#[command(name = "capledger")]
#[command(about = "Equity capitalization ledger: record transactions, query ownership")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a ledger data directory
    Init {
        /// Ledger data directory
        dir: String,
    },
    /// Create a share class
    CreateClass {
        /// Ledger data directory
        dir: String,
        /// Display name (the identifier is derived from it)
        #[arg(long)]
        name: String,
        /// Class type: common or preferred
        #[arg(long, default_value = "common")]
        class_type: String,
        /// Authorized share ceiling
        #[arg(long)]
        authorized: u64,
    },
    /// Amend a share class's authorized ceiling
    Authorize {
        /// Ledger data directory
        dir: String,
        /// Share class ID (e.g. class:common)
        #[arg(long)]
        class: String,
        /// New authorized ceiling
        #[arg(long)]
        shares: u64,
    },
    /// Create a shareholder
    CreateHolder {
        /// Ledger data directory
        dir: String,
        /// Display name (the identifier is derived from it)
        #[arg(long)]
        name: String,
        /// Holder type: individual, entity, or trust
        #[arg(long, default_value = "individual")]
        holder_type: String,
        /// Mark the shareholder as a founder
        #[arg(long)]
        founder: bool,
        /// Link to a legal entity record (e.g. entity:acme)
        #[arg(long)]
        entity: Option<String>,
    },
    /// Record an equity transaction
    Record {
        /// Ledger data directory
        dir: String,
        /// Shareholder ID (e.g. holder:alice)
        #[arg(long)]
        holder: String,
        /// Share class ID (e.g. class:common)
        #[arg(long)]
        class: String,
        /// Transaction type: issuance, exercise, repurchase, or cancellation
        #[arg(long)]
        tx_type: String,
        /// Number of shares
        #[arg(long)]
        shares: u64,
        /// Monetary consideration (decimal, default 0)
        #[arg(long, default_value = "0")]
        amount: String,
        /// Business date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Output the committed transaction as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the ownership table
    Table {
        /// Ledger data directory
        dir: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the issued-vs-authorized summary for a share class
    Summary {
        /// Ledger data directory
        dir: String,
        /// Share class ID
        #[arg(long)]
        class: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one shareholder's holdings by share class
    Holdings {
        /// Ledger data directory
        dir: String,
        /// Shareholder ID
        #[arg(long)]
        holder: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List committed transactions in canonical replay order
    List {
        /// Ledger data directory
        dir: String,
        /// Only transactions for this shareholder ID
        #[arg(long)]
        holder: Option<String>,
        /// Only transactions for this share class ID
        #[arg(long)]
        class: Option<String>,
        /// Only transactions of this type
        #[arg(long)]
        tx_type: Option<String>,
        /// Only transactions occurring on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only transactions occurring on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Verify transaction IDs and sequence ordering in a journal file
    Verify {
        /// Path to a journal file (.eqj)
        journal: String,
        /// Exit with an error code if any check fails
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cross-check the cached projection against a full journal replay
    Reconcile {
        /// Ledger data directory
        dir: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { dir } => init::run(dir),
        Commands::CreateClass {
            dir,
            name,
            class_type,
            authorized,
        } => create_class::run(dir, name, class_type, authorized),
        Commands::Authorize { dir, class, shares } => authorize::run(dir, class, shares),
        Commands::CreateHolder {
            dir,
            name,
            holder_type,
            founder,
            entity,
        } => create_holder::run(dir, name, holder_type, founder, entity),
        Commands::Record {
            dir,
            holder,
            class,
            tx_type,
            shares,
            amount,
            date,
            json,
        } => record::run(dir, holder, class, tx_type, shares, amount, date, json),
        Commands::Table { dir, json } => table::run(dir, json),
        Commands::Summary { dir, class, json } => summary::run(dir, class, json),
        Commands::Holdings { dir, holder, json } => holdings::run(dir, holder, json),
        Commands::List {
            dir,
            holder,
            class,
            tx_type,
            from,
            to,
            json,
        } => list::run(dir, holder, class, tx_type, from, to, json),
        Commands::Verify {
            journal,
            strict,
            json,
        } => verify::run(journal, strict, json),
        Commands::Reconcile { dir, json } => reconcile::run(dir, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
