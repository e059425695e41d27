mod config;
mod employees;
mod http;

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{
    Department, EmployeeError, EmployeeInput, EmployeeService, SeaOrmEmployeeStore,
};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employees-server", version, about = "Employee records service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert a handful of demo employees.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
    #[arg(long, help = "Keep employees in process memory instead of the database")]
    in_memory: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

const SEED_EMPLOYEES: [(&str, &str, Department, bool); 4] = [
    ("Ada Lovelace", "10000000001", Department::It, true),
    ("Grace Hopper", "10000000002", Department::It, false),
    ("Mary Jackson", "10000000003", Department::Finance, true),
    ("Alan Turing", "10000000004", Department::Hr, true),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    let outcome = match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    };
    shutdown_tracing();
    outcome
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let serve_config = ServeConfig::from(&cmd);
    if cmd.in_memory {
        warn!("serving from the in-memory store; data is lost on shutdown");
        return http::serve(serve_config, AppState::in_memory(config)).await;
    }

    let pool = setup_pool().await?;
    if config.auto_migrate {
        Migrator::up(&pool, None).await?;
        info!("database migrations applied on startup");
    } else {
        ensure_migrations(&pool, cmd.allow_dirty).await?;
    }
    http::serve(serve_config, AppState::with_database(pool, config)).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `employees-server migrate up`, set AUTO_MIGRATE=true or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn run_seed() -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, false).await?;
    let service = EmployeeService::new(Arc::new(SeaOrmEmployeeStore::new(pool)));

    let mut inserted = 0;
    for (name, national_id, department, enabled) in SEED_EMPLOYEES {
        let input = EmployeeInput {
            name: name.to_string(),
            national_id: national_id.to_string(),
            department,
            enabled,
        };
        match service.create(input).await {
            Ok(employee) => {
                inserted += 1;
                info!(id = employee.id, %national_id, "seeded employee");
            }
            Err(EmployeeError::Conflict) => {
                info!(%national_id, "employee already present; skipping");
            }
            Err(err) => return Err(err.into()),
        }
    }
    info!(inserted, "seed complete");
    Ok(())
}
