pub mod config;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod models;
pub mod newsvendor;
pub mod output;
pub mod state;
pub mod stream;
pub mod summary;
