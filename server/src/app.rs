//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{ApiServer, AuthManager};
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::DatabaseService;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub database: Arc<DatabaseService>,
    pub auth: Arc<AuthManager>,
}

impl CoreApp {
    /// Entry point: `.env`, flags, logging, then the chosen subcommand
    pub async fn run() -> Result<()> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            eprintln!("Ignoring unreadable .env file: {}", e);
        }

        let (cli, command) = cli::parse();
        Self::init_logging(cli.debug);

        match command.unwrap_or(Commands::Start) {
            Commands::Migrate => Self::migrate(&cli).await,
            Commands::Start => Self::start_server(Self::init(&cli).await?).await,
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let database = Arc::new(
            DatabaseService::init(&config.database)
                .await
                .with_context(|| format!("Failed to open {} database", config.database.backend))?,
        );
        let auth = Arc::new(AuthManager::init(&config.auth));
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            config,
            database,
            auth,
            shutdown,
        })
    }

    /// Opening the database applies pending migrations; nothing else runs
    async fn migrate(cli: &CliConfig) -> Result<()> {
        let config = AppConfig::load(cli)?;
        let database = DatabaseService::init(&config.database)
            .await
            .with_context(|| format!("Failed to migrate {} database", config.database.backend))?;
        database.close().await;

        println!("Migrations applied ({})", config.database.backend);
        Ok(())
    }

    /// `--debug` raises the crate's own default level so request logs show
    fn init_logging(debug: bool) {
        let level = if debug { "debug" } else { "info" };
        let default_filter = format!("info,{}_server={}", APP_NAME_LOWER, level);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Signals must be caught before the listener starts accepting
        app.shutdown.install_signal_handlers();

        if app.config.debug {
            tracing::info!(
                origins = ?app.config.cors.allowed_origins,
                "Debug mode: logging every request with its Origin"
            );
        }

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.auth.is_enabled(),
            app.auth.bootstrap_token(),
            app.database.backend(),
        );

        let app = ApiServer::new(app).start().await?;
        app.shutdown.shutdown().await;
        Ok(())
    }
}
