use std::sync::Arc;

use axum::Router;

use crate::AppState;

pub mod actors;
pub mod categories;
pub mod films;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(actors::router())
        .merge(films::router())
        .merge(categories::router())
}

pub(crate) fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
