//! Server-hosted controller for a translation front end.
//!
//! Each browser page connects over a websocket and is driven by its own
//! [`controller::TranslatorController`], which talks to the translation
//! backend over HTTP and renders through [`view::View`] commands.

pub mod backend;
pub mod config;
pub mod controller;
pub mod downloads;
pub mod error;
pub mod preferences;
pub mod server;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{ClientError, ClientResult};
