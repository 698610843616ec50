use backend::{api, shared, system};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::{
        http::{header, Method},
        middleware,
        routing::{delete, get, post, put},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use backend::system::auth::middleware::{require_admin, require_auth, require_manager};
    use backend::system::middleware::request_logger;

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Отключаем логи SQL запросов, но оставляем логи приложения
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Load config and initialize database
    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Ensure admin user exists
    system::initialization::ensure_admin_user_exists().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/auth/logout", post(system::handlers::auth::logout))
        .route(
            "/api/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // USER MANAGEMENT (ADMIN ONLY)
        // ========================================
        .route(
            "/api/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/api/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/api/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // SALES
        // ========================================
        .route(
            "/api/sales",
            get(api::handlers::sales::list)
                .post(api::handlers::sales::create)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/sales/summary",
            get(api::handlers::sales::summary).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/sales/import",
            post(api::handlers::import::import_sales)
                .layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/sales/:id",
            get(api::handlers::sales::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/sales/:id",
            put(api::handlers::sales::update).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/sales/:id",
            delete(api::handlers::sales::delete).layer(middleware::from_fn(require_admin)),
        )
        // ========================================
        // EXPENSES
        // ========================================
        .route(
            "/api/expenses",
            get(api::handlers::expenses::list)
                .post(api::handlers::expenses::create)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/expenses/summary",
            get(api::handlers::expenses::summary).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/expenses/:id",
            get(api::handlers::expenses::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/expenses/:id",
            put(api::handlers::expenses::update).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/expenses/:id",
            delete(api::handlers::expenses::delete).layer(middleware::from_fn(require_admin)),
        )
        // ========================================
        // LADIES & DRINKS
        // ========================================
        .route(
            "/api/ladies",
            get(api::handlers::ladies::list).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/ladies",
            post(api::handlers::ladies::create).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/ladies/:id",
            get(api::handlers::ladies::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/ladies/:id",
            put(api::handlers::ladies::update).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/ladies/:id",
            delete(api::handlers::ladies::deactivate)
                .layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/lady-drinks",
            get(api::handlers::lady_drinks::list_by_range)
                .post(api::handlers::lady_drinks::save_for_date)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/lady-drinks/summary",
            get(api::handlers::lady_drinks::summary).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/lady-drinks/:date",
            get(api::handlers::lady_drinks::get_by_date)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // EMPLOYEES & SALARIES
        // ========================================
        .route(
            "/api/employees",
            get(api::handlers::employees::list).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/employees",
            post(api::handlers::employees::create).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/employees/:id",
            get(api::handlers::employees::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/employees/:id",
            put(api::handlers::employees::update).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/employees/:id",
            delete(api::handlers::employees::deactivate)
                .layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/api/salaries",
            get(api::handlers::salaries::list).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/salaries",
            post(api::handlers::salaries::create).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/salaries/summary",
            get(api::handlers::salaries::summary).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/salaries/:id",
            get(api::handlers::salaries::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/salaries/:id",
            put(api::handlers::salaries::update).layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/api/salaries/:id",
            delete(api::handlers::salaries::delete).layer(middleware::from_fn(require_admin)),
        )
        // ========================================
        // REPORTS
        // ========================================
        .route(
            "/api/reports/financial",
            get(api::handlers::reports::financial).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/reports/dashboard",
            get(api::handlers::reports::dashboard).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/reports/activity-logs",
            get(api::handlers::reports::activity_logs)
                .layer(middleware::from_fn(require_manager)),
        )
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            // Propagate the error to stop the application
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
