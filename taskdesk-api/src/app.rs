/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdesk_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config)?;
/// let app = taskdesk_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;
use taskdesk_shared::{
    auth::{
        credentials::CredentialService,
        jwt::TokenService,
        middleware::{self as auth_middleware, AuthContext},
        password::PasswordError,
    },
    store::{postgres::PgStore, TaskStore, UserStore},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Every field
/// is either `Arc`-backed or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login checks
    pub credentials: CredentialService,

    /// Task persistence
    pub tasks: Arc<dyn TaskStore>,

    /// Access token issue and verification
    pub tokens: TokenService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state backed by PostgreSQL
    pub fn new(db: PgPool, config: Config) -> Result<Self, PasswordError> {
        let store = Arc::new(PgStore::new(db));
        Self::with_stores(store.clone(), store, config)
    }

    /// Creates application state over arbitrary store implementations
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        config: Config,
    ) -> Result<Self, PasswordError> {
        let credentials = CredentialService::new(users, config.password)?;
        let tokens = TokenService::with_ttl(
            config.jwt.secret.clone(),
            Duration::seconds(config.jwt.access_token_ttl_secs),
        );

        Ok(Self {
            credentials,
            tasks,
            tokens,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                    # API description (public)
/// └── /api/
///     ├── POST /register        # public
///     ├── POST /login           # public
///     ├── GET    /tasks         # bearer
///     ├── POST   /tasks         # bearer
///     ├── GET    /tasks/:id     # bearer
///     ├── PUT    /tasks/:id     # bearer
///     └── DELETE /tasks/:id     # bearer
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (task routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes (require JWT authentication)
    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new().merge(auth_routes).merge(task_routes);

    let cors = if state.config.cors_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::index::index))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer token, then injects `AuthContext` into request
/// extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_context: AuthContext =
        auth_middleware::authenticate(&state.tokens, req.headers()).map_err(|e| {
            tracing::debug!(error = %e, "Rejected unauthenticated request");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
