//! Product API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/products", get(handler::list).post(handler::create))
        .route(
            "/api/products/{id}",
            put(handler::update).delete(handler::delete),
        )
}
