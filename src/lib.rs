pub mod cli;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod games;
pub mod logging;
pub mod random;
pub mod settings;
pub mod sound;
pub mod terminal;
pub mod timer;
pub mod words;
