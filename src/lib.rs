pub mod api;
pub mod config;
pub mod session;
pub mod solver;
pub mod utils;
