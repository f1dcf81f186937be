pub mod auth;
pub mod users;

pub use auth::auth_routes;
pub use users::user_routes;
