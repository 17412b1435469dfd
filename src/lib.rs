//! Unison Library
//!
//! Core modules for the Unison voice command dispatcher.

pub mod audit;
pub mod brain;
pub mod config;
pub mod error;
pub mod feedback;
pub mod listen;
pub mod module;
pub mod modules;
pub mod playback;
pub mod switch;
