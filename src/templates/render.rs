use tera::Context;

use super::Template;
use crate::error::{error_chain, RenderError};
use crate::models::ParameterSet;

/// Render a template against a parameter set into command lines.
///
/// Output lines are right-trimmed and blank lines dropped; leading
/// indentation is kept because some vendors' command hierarchy is written
/// with it. Any failure aborts the whole render.
pub fn render(template: &Template, params: &ParameterSet) -> Result<Vec<String>, RenderError> {
    let context = build_context(params);
    let mut commands = Vec::new();

    for name in template.compiled_names() {
        let rendered = template
            .engine()
            .render(name, &context)
            .map_err(|e| RenderError {
                vendor: template.vendor(),
                config_type: template.config_type(),
                message: error_chain(&e),
            })?;
        commands.extend(split_command_lines(&rendered));
    }

    Ok(commands)
}

fn build_context(params: &ParameterSet) -> Context {
    let mut context = Context::new();
    for (key, value) in params.iter() {
        context.insert(key.as_str(), value);
    }
    context
}

/// Split rendered text into non-blank, right-trimmed lines
pub fn split_command_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
