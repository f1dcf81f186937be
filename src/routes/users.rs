use axum::{routing::{delete, get, put}, Router};

use crate::handlers::health::health_check;
use crate::handlers::users::{
    delete_user, find_by_email, find_by_username, list_users, update_user,
};
use crate::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(list_users))
        .route("/user/username/{username}", get(find_by_username))
        .route("/user/email/{email}", get(find_by_email))
        .route("/user/{username}", put(update_user))
        .route("/user/{username}", delete(delete_user))
}
