use anyhow::Context;
use bout::{FixedRandom, LocalRandom, RandomOrgClient, RandomSource, Ring};
use clap::{Parser, Subcommand};
use serde::Serialize;
use storage::{
    Database,
    dto::{boxer::CreateBoxerRequest, leaderboard::LeaderboardSort},
    repository::boxer::BoxerRepository,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::{Config, RandomSourceKind};

#[derive(Parser)]
#[command(name = "boxing")]
#[command(about = "Boxer registry and fight simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new boxer
    Create {
        name: String,
        weight: i64,
        height: i64,
        reach: f64,
        age: i64,
    },
    /// Remove a boxer by ID
    Delete { id: i64 },
    /// Show one boxer
    Get {
        #[command(flatten)]
        key: BoxerKey,
    },
    /// List every registered boxer
    List,
    /// Boxers with at least one fight, best first
    Leaderboard {
        #[arg(long, default_value = "wins")]
        sort_by: String,
    },
    /// Put two boxers in the ring and let them fight
    Fight {
        first: String,
        second: String,

        /// Use this value in [0, 1) instead of drawing one
        #[arg(long)]
        draw: Option<f64>,
    },
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct BoxerKey {
    #[arg(long)]
    id: Option<i64>,

    #[arg(long)]
    name: Option<String>,
}

#[derive(Serialize)]
struct FightReport {
    winner: String,
    loser: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("boxing={},bout={},storage={}", log_level, log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to open database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    debug!("Database ready at {}", config.database_url);

    let repo = BoxerRepository::new(db.pool());

    match cli.command {
        Commands::Create {
            name,
            weight,
            height,
            reach,
            age,
        } => {
            let req = CreateBoxerRequest::new(name, weight, height, reach, age);
            let boxer = repo.create(&req).await?;
            print_json(&boxer)?;
        }
        Commands::Delete { id } => {
            repo.delete(id).await?;
            info!("Boxer {} deleted", id);
        }
        Commands::Get { key } => {
            let boxer = match (key.id, key.name) {
                (Some(id), _) => repo.get_by_id(id).await?,
                (None, Some(name)) => repo.get_by_name(&name).await?,
                (None, None) => anyhow::bail!("either --id or --name is required"),
            };
            print_json(&boxer)?;
        }
        Commands::List => {
            print_json(&repo.list().await?)?;
        }
        Commands::Leaderboard { sort_by } => {
            let sort_by: LeaderboardSort = sort_by.parse()?;
            print_json(&repo.leaderboard(sort_by).await?)?;
        }
        Commands::Fight {
            first,
            second,
            draw,
        } => {
            let random = build_random_source(&config, draw)?;

            let mut ring = Ring::new();
            ring.enter_ring(repo.get_by_name(&first).await?)?;
            ring.enter_ring(repo.get_by_name(&second).await?)?;

            let winner = ring.fight(&*random, &repo).await?;
            let loser = if winner == first { second } else { first };
            print_json(&FightReport { winner, loser })?;
        }
    }

    Ok(())
}

fn build_random_source(
    config: &Config,
    draw: Option<f64>,
) -> anyhow::Result<Box<dyn RandomSource>> {
    if let Some(value) = draw {
        return Ok(Box::new(FixedRandom::new(value)?));
    }

    let source: Box<dyn RandomSource> = match config.random_source {
        RandomSourceKind::RandomOrg => Box::new(RandomOrgClient::new(config.random_org_timeout)?),
        RandomSourceKind::Local => Box::new(LocalRandom::new()),
    };

    Ok(source)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
