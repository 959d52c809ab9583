//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseMailer, ServerDeps};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    health_handler, home_handler, root_handler, send_otp_handler, signup_handler,
    update_profile_handler, verify_otp_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
///
/// Auth routes sit behind a per-IP rate limit; /home and /profile sit
/// behind the JWT middleware.
pub fn build_app(
    pool: PgPool,
    mailer: Arc<dyn BaseMailer>,
    jwt_service: Arc<JwtService>,
    allowed_origins: Vec<String>,
) -> Router {
    let server_deps = Arc::new(ServerDeps::new(
        pool.clone(),
        mailer,
        jwt_service.clone(),
    ));

    let state = AppState {
        db_pool: pool,
        server_deps,
        jwt_service,
    };

    // CORS configuration - any origin unless a list is configured
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting for OTP operations: 10 req/sec per IP with burst of 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let auth_routes = Router::new()
        .route("/send-otp", post(send_otp_handler))
        .route("/verify-otp", post(verify_otp_handler))
        .route("/signup", post(signup_handler))
        .layer(GovernorLayer {
            config: rate_limit_config,
        });

    let protected_routes = Router::new()
        .route("/home", get(home_handler))
        .route("/profile", put(update_profile_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/auth", auth_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
