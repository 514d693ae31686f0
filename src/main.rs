use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pearshop::{
  adapters::http::{
    AuthMiddleware, RequestIdMiddleware, configure_back_office_routes, configure_cart_routes,
    configure_order_routes,
  },
  application::cart::{AddToCartUseCase, ClearCartUseCase, GetCartUseCase, ReduceCartItemUseCase},
  application::order::{
    ChangeOrderStatusUseCase, GetOrderDetailsUseCase, ListOrdersUseCase, PlaceOrderUseCase,
  },
  domain::cart::{CartService, CartStore},
  domain::identity::IdentityResolver,
  domain::order::{OrderService, StatusPolicy},
  infrastructure::{
    config::Config,
    persistence::postgres::{PostgresCartStore, PostgresOrderLedger, PostgresProductRepository},
    security::SignedTokenIdentity,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pearshop=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting PEAR shop backend");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let product_repo = Arc::new(PostgresProductRepository::new(db_pool.clone()));
  let cart_store: Arc<dyn CartStore> = Arc::new(PostgresCartStore::new(db_pool.clone()));
  let order_ledger = Arc::new(PostgresOrderLedger::new(db_pool.clone()));

  // Initialize identity resolver
  let identity: Arc<dyn IdentityResolver> = Arc::new(SignedTokenIdentity::new(
    config.auth.token_secret.clone(),
  ));

  // Initialize domain services
  let cart_service = Arc::new(CartService::new(cart_store.clone(), product_repo.clone()));
  let order_service = Arc::new(OrderService::new(
    order_ledger,
    product_repo,
    cart_store.clone(),
    StatusPolicy::standard(),
  ));

  // Initialize cart use cases
  let get_cart_use_case = Arc::new(GetCartUseCase::new(cart_service.clone()));
  let add_to_cart_use_case = Arc::new(AddToCartUseCase::new(cart_service.clone()));
  let reduce_cart_use_case = Arc::new(ReduceCartItemUseCase::new(cart_service.clone()));
  let clear_cart_use_case = Arc::new(ClearCartUseCase::new(cart_service.clone()));

  // Initialize order use cases
  let place_order_use_case = Arc::new(PlaceOrderUseCase::new(order_service.clone()));
  let list_orders_use_case = Arc::new(ListOrdersUseCase::new(order_service.clone()));
  let order_details_use_case = Arc::new(GetOrderDetailsUseCase::new(order_service.clone()));
  let change_status_use_case = Arc::new(ChangeOrderStatusUseCase::new(order_service.clone()));

  // Background pass that sweeps up cart lines left behind when the
  // clear-after-placement step failed
  if config.reconciler.enabled {
    let reconcile_store = cart_store.clone();
    let interval_seconds = config.reconciler.interval_seconds;
    tokio::spawn(async move {
      let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
      loop {
        ticker.tick().await;
        match reconcile_store.reconcile_placed().await {
          Ok(0) => {}
          Ok(removed) => {
            tracing::info!(removed, "Reconciled stale cart lines");
          }
          Err(e) => {
            tracing::warn!("Cart reconciliation pass failed: {}", e);
          }
        }
      }
    });
    tracing::info!(
      "Cart reconciler running every {} seconds",
      config.reconciler.interval_seconds
    );
  }

  let pagination = config.pagination.clone();
  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      .app_data(web::Data::new(pagination.clone()))
      // Configure cart API routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/cart")
          .wrap(AuthMiddleware::new(identity.clone()))
          .configure(|cfg| {
            configure_cart_routes(
              cfg,
              get_cart_use_case.clone(),
              add_to_cart_use_case.clone(),
              reduce_cart_use_case.clone(),
              clear_cart_use_case.clone(),
            )
          }),
      )
      // Configure storefront order API routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/orders")
          .wrap(AuthMiddleware::new(identity.clone()))
          .configure(|cfg| {
            configure_order_routes(
              cfg,
              place_order_use_case.clone(),
              list_orders_use_case.clone(),
              order_details_use_case.clone(),
              change_status_use_case.clone(),
            )
          }),
      )
      // Configure back-office API routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/v1/back-office")
          .wrap(AuthMiddleware::new(identity.clone()))
          .configure(|cfg| {
            configure_back_office_routes(
              cfg,
              change_status_use_case.clone(),
              order_details_use_case.clone(),
              list_orders_use_case.clone(),
            )
          }),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
