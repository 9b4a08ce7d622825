use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use household_finance::{backend, cli, config::AppConfig, database, telemetry};

#[derive(Parser, Debug)]
#[command(name = "household-finance", about = "Household ledger: HTTP API and terminal dashboard.")]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Overrides HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Open the terminal dashboard for one user
    Dashboard {
        #[arg(long)]
        user_id: i64,
    },
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Cli::parse();

    let mut config = AppConfig::from_env().context("reading configuration")?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    // The dashboard owns the terminal, so only the other commands log to stdout.
    if !matches!(args.command, Command::Dashboard { .. }) {
        telemetry::init_tracing();
    }

    let pool = database::db::connection::get_db_pool(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;
    database::db::migrate::run_migrations(&pool).await?;

    match args.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.host);
            let port = port.unwrap_or(config.port);
            backend::run_server(pool, &host, port).await?;
        }
        Command::Dashboard { user_id } => cli::run(pool, user_id).await?,
        Command::Migrate => tracing::info!("migrations applied to {}", config.database_url),
    }
    Ok(())
}
