//! Place Keeper - a chat bot that remembers places.
//!
//! Users save named, photographed places through a short dialogue, list
//! them, and ask which of them are within walking distance of where they
//! stand right now.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
