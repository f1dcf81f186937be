pub mod user;

pub use user::{LoginInput, RegisterInput, UpdateUserInput, UserRecord, UserSummary};
