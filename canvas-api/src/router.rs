use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes};

pub fn create(connection_pool: PgPool, config: Settings) -> Router<()> {
    let app = Router::new()
        .route("/", get(|| async { "Canvas API" }))
        .nest("/dashboard", routes::dashboard::router())
        .nest("/projects", routes::projects::router())
        .nest("/tasks", routes::tasks::router())
        .nest("/time-entries", routes::time_entries::router())
        .nest("/capacities", routes::capacities::router())
        .nest("/teams", routes::teams::router())
        .nest("/export", routes::export::router());

    let app_state = AppState::new(connection_pool, &config);

    let allowed_origin = config
        .application
        .app_url
        .parse::<HeaderValue>()
        .expect("Invalid app URL");
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(["content-type".parse().unwrap()])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::exact(allowed_origin));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
