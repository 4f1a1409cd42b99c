pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod utils;

pub use client::ItemsClient;
pub use error::ItemboxError;
