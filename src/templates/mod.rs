mod filters;
mod render;
mod repository;

pub use render::{render, split_command_lines};
pub use repository::{Template, TemplateRepository};
