//! `setlog` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the workout log API server.
//! - `migrate` — run pending database migrations.

use clap::{Parser, Subcommand};
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://setlog.db";

#[derive(Parser)]
#[command(name = "setlog", about = "Workout logging service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,

        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,

        /// Connection pool ceiling.
        #[arg(long, default_value_t = 10)]
        max_connections: u32,
    },
    /// Run pending database migrations and exit.
    Migrate {
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, database_url, max_connections } => {
            info!("Starting API server on {bind}");
            let pool = db::pool::create_pool(&database_url, max_connections)
                .await
                .expect("failed to connect to database");
            db::pool::run_migrations(&pool)
                .await
                .expect("failed to run migrations");
            api::serve(&bind, pool).await.expect("server error");
        }
        Command::Migrate { database_url } => {
            let pool = db::pool::create_pool(&database_url, 1)
                .await
                .expect("failed to connect to database");
            db::pool::run_migrations(&pool)
                .await
                .expect("failed to run migrations");
            info!("Migrations complete");
        }
    }
}
