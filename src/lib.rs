pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub fn app(state: AppState) -> Router {
    routes::router()
        .with_state(Arc::new(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
