pub mod appearance;
pub mod audio;
pub mod autopilot;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod ghost;
pub mod ledger;
pub mod log;
pub mod maze;
pub mod mover;
pub mod player;
pub mod rng;
pub mod types;
