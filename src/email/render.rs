//! Jinja-style rendering of the HTML email templates.

use crate::error::AppError;
use serde::Serialize;
use std::path::Path;

/// Load `dir/template_name`, trim it and render it with `context`. Fails if the file is missing.
pub fn render_email_template<C: Serialize>(
    dir: &Path,
    template_name: &str,
    context: C,
) -> Result<String, AppError> {
    let path = dir.join(template_name);
    let source = std::fs::read_to_string(&path).map_err(|e| {
        AppError::Internal(format!("email template {}: {}", path.display(), e))
    })?;
    minijinja::Environment::new()
        .render_str(source.trim(), context)
        .map_err(|e| AppError::Internal(format!("email template {}: {}", template_name, e)))
}
