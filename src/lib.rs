// ABOUTME: Root module for parley - conversation context for chat backends.
// ABOUTME: Re-exports all public types from submodules.

pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod prelude;
pub mod session;

pub use config::Config;
pub use error::ParleyError;
