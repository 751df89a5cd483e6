pub mod applications;
pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod notifications;
pub mod state;
