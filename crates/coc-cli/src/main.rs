//! Command-line front end for the coc check assistant.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Session;

#[derive(Parser)]
#[command(
    name = "coc",
    about = "Call of Cthulhu character sheets, skill checks, and dice",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file holding every user's characters
    #[arg(long, global = true, default_value = "coc-store.json")]
    store: PathBuf,

    /// Whose characters to use
    #[arg(long, global = true, default_value = "local")]
    user: String,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a character from a sheet CSV export or a JSON record
    Import {
        /// Sheet export (.csv) or character record (.json)
        file: PathBuf,

        /// Published-to-web link of the sheet (used as its identifier)
        #[arg(long)]
        url: Option<String>,
    },

    /// Replace an imported character with a newer export
    Update {
        /// Sheet export (.csv) or character record (.json)
        file: PathBuf,

        /// Published-to-web link of the sheet (used as its identifier)
        #[arg(long)]
        url: Option<String>,
    },

    /// List imported characters
    List {
        /// Also show each sheet's link
        #[arg(short, long)]
        links: bool,
    },

    /// Make another character active
    Switch {
        /// Character name fragment or sheet link
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Remove a character
    Remove {
        /// Character name fragment or sheet link
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show the active character's sheet
    Sheet,

    /// Print the sheet links of every stored character
    Export {
        /// Print the whole stored roster as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Delete every stored character for this user
    Forget,

    /// Roll a skill, characteristic, or numeric check
    ///
    /// Flags: -bonus <n>, -penalty <n>, -phrase <text>, -rr <n>
    Check {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Roll a dice expression such as 3d6+2 or 2d10kh1
    Roll {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        expr: Vec<String>,
    },

    /// Show or change luck, sanity, health, or magic
    ///
    /// Requests: max, set <expr>, +<expr>, -<expr>
    Balance {
        /// luck, sanity, health, or magic
        resource: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        request: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut session = Session::new(cli.store, cli.user, cli.seed);
    let result = match cli.command {
        Commands::Import { file, url } => commands::import::run(&mut session, &file, url.as_deref()),
        Commands::Update { file, url } => commands::import::update(&mut session, &file, url.as_deref()),
        Commands::List { links } => commands::roster::list(&session, links),
        Commands::Switch { query } => commands::roster::switch(&mut session, &query.join(" ")),
        Commands::Remove { query } => commands::roster::remove(&mut session, &query.join(" ")),
        Commands::Sheet => commands::sheet::run(&session),
        Commands::Export { json } => commands::roster::export(&session, json),
        Commands::Forget => commands::roster::forget(&mut session),
        Commands::Check { query } => commands::check::run(&mut session, &query.join(" ")),
        Commands::Roll { expr } => commands::roll::run(&mut session, &expr.join(" ")),
        Commands::Balance { resource, request } => {
            commands::balance::run(&mut session, &resource, &request.join(" "))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
