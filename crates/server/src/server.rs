use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::{analytics, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Every expense route, mounted under `/api/expenses`.
pub fn router(state: ServerState) -> Router {
    let expenses = Router::new()
        .route("/", get(expenses::list).post(expenses::create))
        .route(
            "/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route("/category/{category}", get(expenses::by_category))
        .route(
            "/category/{category}/date-range",
            get(expenses::by_category_and_date_range),
        )
        .route("/date-range", get(expenses::by_date_range))
        .route("/amount-greater-than/{amount}", get(expenses::above_amount))
        .route("/search", get(expenses::search))
        .route(
            "/analytics/total-by-category",
            get(analytics::total_by_category),
        )
        .route(
            "/analytics/total-by-date-range",
            get(analytics::total_by_date_range),
        );

    Router::new()
        .nest("/api/expenses", expenses)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
