pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod pages;
pub mod routes;
pub mod store;
pub mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{db::ConnectionFactory, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
}

impl AppState {
    pub fn new(connections: ConnectionFactory) -> Self {
        Self { store: MovieStore::new(connections) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/edit", get(pages::new_movie))
        .route("/edit/{id}", get(pages::edit_movie))
        .route("/save", post(pages::save_movie))
        .route("/delete/{id}", post(pages::delete_movie))
        .route("/movies", get(routes::list_movies).post(routes::create_movie))
        .route(
            "/movies/{id}",
            get(routes::get_movie).put(routes::update_movie).delete(routes::delete_movie),
        )
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any)),
        )
}
