//! Switchgen turns a vendor, a configuration type and a flat parameter map
//! into the CLI command lines for that vendor's switches.
//!
//! A request flows through `validate` (rule tables per config type), the
//! `pipeline` (derived variables and vendor dialect), and finally the Tera
//! templates held by `templates::TemplateRepository`.

pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod router;
pub mod templates;
pub mod utils;
pub mod validate;

use std::sync::Arc;

use config::Config;
use generator::ConfigGenerator;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub generator: Arc<ConfigGenerator>,
}
