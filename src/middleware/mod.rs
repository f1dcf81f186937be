pub mod panic;

pub use panic::{catch_panic_layer, setup_panic_hook};
