pub mod config;
pub mod error;
pub mod persistence;
pub mod pgn;
pub mod scheduler;
pub mod state;
pub mod sync;
