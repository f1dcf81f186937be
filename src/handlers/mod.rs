pub mod auth;
pub mod health;
pub mod users;

pub use auth::{login, register};
pub use health::health_check;
pub use users::{delete_user, find_by_email, find_by_username, list_users, update_user};
