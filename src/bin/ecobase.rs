use anyhow::Result;
use clap::Parser;
use ecobase::database::ensure_data_dir;
use ecobase::{get_sqlite_info, EcobaseConfig, EcobaseDatabase};
use tracing::{info, Level};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// configuration file path, by default $HOME/.ecobase/ecobase.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Database file path, overriding the configured data directory
    #[clap(long)]
    db: Option<String>,

    /// Print the resulting database status as JSON
    #[clap(long)]
    json: bool,

    /// Print debug information
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            // filter spans/events with level INFO or higher.
            .with_max_level(Level::INFO)
            .init();
    }

    let sqlite_path = match &cli.db {
        Some(path) => path.clone(),
        None => {
            let config = EcobaseConfig::new(&cli.config)?;
            ensure_data_dir(&config.data_dir)?;
            config.sqlite_path()
        }
    };

    // Opening the database runs the idempotent schema bootstrap and commits.
    // Any failure propagates and exits non-zero; the connection guard
    // releases the database on both paths.
    let db = EcobaseDatabase::open(&sqlite_path)?;
    info!(
        "schema bootstrap complete, {} tables present",
        db.table_names()?.len()
    );
    drop(db);

    let status = get_sqlite_info(&sqlite_path);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", status.summary());
    }

    Ok(())
}
