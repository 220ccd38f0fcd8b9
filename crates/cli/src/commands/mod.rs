pub mod ai;
pub mod board;
pub mod config;
pub mod views;
