// Crate root library declaration and module exports.
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod tui;
