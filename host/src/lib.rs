pub mod benchmark;
pub mod config;
pub mod pilots;
pub mod runner;
pub mod store;
pub mod util;
