use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::core::middleware::auth_middleware;
use crate::features::users::dtos::MAX_AVATAR_SIZE;
use crate::features::users::handlers;
use crate::features::users::state::UsersState;

/// Public account routes (no authentication required)
pub fn public_routes(state: UsersState) -> Router {
    Router::new()
        .route("/api/v1/users", post(handlers::register_user))
        .route("/api/v1/sessions", post(handlers::login))
        .route(
            "/api/v1/email_checkers",
            post(handlers::check_email_availability),
        )
        .with_state(state)
}

/// Routes that require a bearer token
pub fn protected_routes(state: UsersState) -> Router {
    let auth_state = state.auth_state();

    Router::new()
        .route(
            "/api/v1/avatars",
            // Allow the avatar plus some room for multipart overhead
            post(handlers::upload_avatar).layer(DefaultBodyLimit::max(MAX_AVATAR_SIZE + 64 * 1024)),
        )
        .route("/api/v1/users/fetch", get(handlers::fetch_user))
        .route_layer(from_fn_with_state(auth_state, auth_middleware))
        .with_state(state)
}

pub fn routes(state: UsersState) -> Router {
    Router::new()
        .merge(public_routes(state.clone()))
        .merge(protected_routes(state))
}
