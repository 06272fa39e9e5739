//! Reusable application server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full lifecycle: database
//! init, migrations, default admin bootstrap, dataset seeding, REST API
//! serve and graceful shutdown. Both the CLI binary and an embedding
//! desktop shell use this instead of duplicating bootstrap code.

use std::path::Path;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::api::{create_api_router, ApiState};
use crate::application::session::AuthSession;
use crate::config::AppConfig;
use crate::domain::{CreateUserDto, RepositoryProvider, UserRole};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::seed;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create default admin user if no users exist (default: true).
    pub create_default_admin: bool,
    /// Seed the record table from CSV if it is empty (default: true).
    pub seed_dataset: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
            seed_dataset: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running CardioDesk service.
///
/// # Examples
///
/// ```rust,no_run
/// use cardiodesk::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The process-wide authentication session context.
    pub session: AuthSession,
    /// Services and session bundled for the API layer.
    pub state: ApiState,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the REST API is actually listening on (resolves port 0).
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown_tx: oneshot::Sender<()>,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Connect to SQLite and run migrations
    /// 2. Create the default admin user (if enabled)
    /// 3. Seed the dataset from CSV (if enabled and the table is empty)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting CardioDesk service...");

        // SQLite creates the file but not its directory.
        if let Some(parent) = Path::new(&app_cfg.database.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
        };
        info!("Database: {}", db_config.url);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.create_default_admin {
            create_default_admin(repos.as_ref(), &app_cfg).await;
        }

        if opts.seed_dataset {
            let seed_path = seed::locate_seed_csv(app_cfg.seed.csv_path.as_deref());
            if let Err(e) = seed::seed_if_empty(repos.records(), seed_path.as_deref()).await {
                // A failed seed leaves an empty but usable store.
                warn!("Dataset seeding failed: {}", e);
            }
        }

        // ── Session & API ──────────────────────────────────────
        let session = AuthSession::new();
        let state = ApiState::new(repos.clone(), session.clone());
        let router = create_api_router(state.clone());

        let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.api_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        let api_port = local_addr.port();
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let api_task = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = serve.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            session,
            state,
            config: app_cfg,
            api_port,
            db,
            shutdown_tx,
            api_task,
        })
    }

    /// Stop the API server gracefully and close the database.
    pub async fn shutdown(self) {
        info!("Shutting down CardioDesk service...");
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.api_task.await {
            error!("REST API task join error: {}", e);
        }
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }
}

/// Create default admin user if no users exist
async fn create_default_admin(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let users_count = match repos.users().count_users().await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");
    let dto = CreateUserDto {
        username: app_cfg.admin.username.clone(),
        password: app_cfg.admin.password.clone(),
        role: UserRole::Admin,
        is_active: true,
    };
    match repos.users().create_user(dto).await {
        Ok(user) => {
            info!("Default admin created: {}", user.username);
            warn!("Please change the default admin password immediately!");
        }
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize the tracing subscriber, honoring `RUST_LOG` when set.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
