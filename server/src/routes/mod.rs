use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::bookings::create_booking;
use crate::handlers::events::{count_event_bookings, create_event, get_event, list_events};
use crate::handlers::health_check;
use crate::handlers::pages::{book_event, event_detail, home, not_found};
use crate::state::AppState;

fn api_routes(config: &Config) -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/:slug", get(get_event))
        .route("/events/:slug/bookings/count", get(count_event_bookings))
        .route("/bookings", post(create_booking))
        .layer(create_cors_layer(config.cors_allowed_origins.as_deref()))
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let public = &config.public_dir;

    Router::new()
        .route("/", get(home))
        .route("/events/:slug", get(event_detail))
        .route("/events/:slug/book", post(book_event))
        .route("/health", get(health_check))
        .nest("/api", api_routes(config))
        .route_service("/globals.css", ServeFile::new(public.join("globals.css")))
        .nest_service("/icons", ServeDir::new(public.join("icons")))
        .nest_service("/images", ServeDir::new(public.join("images")))
        .fallback(not_found)
        .with_state(state)
        .layer(create_security_headers_layer(
            config.production,
            &config.analytics,
        ))
        .layer(TraceLayer::new_for_http())
}
