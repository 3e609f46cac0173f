//! HTML template engine using Jinja2 syntax.
//!
//! Templates are loaded once at startup from the configured template
//! directory (`templates/` by default) and rendered with minijinja.
//! Files ending in `.html` are auto-escaped.

use axum::response::Html;
use minijinja::{Environment, Value};
use std::path::Path;

use crate::core::error::{AppError, Result};

/// Loaded template environment, shared through the application state
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load every `.html` template below `dir`.
    ///
    /// Template names are paths relative to `dir` (e.g. `rango/index.html`).
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(AppError::Internal(format!(
                "Template directory '{}' does not exist",
                dir.display()
            )));
        }

        let mut env = Environment::new();
        load_templates_recursive(&mut env, dir, dir)?;
        tracing::info!(
            "Loaded {} templates from {}",
            env.templates().count(),
            dir.display()
        );

        Ok(Self { env })
    }

    /// Render `name` with `ctx` into an HTML response body
    pub fn render(&self, name: &str, ctx: Value) -> Result<Html<String>> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }

    #[cfg(test)]
    pub fn exists(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

/// Recursively load all .html templates from a directory
fn load_templates_recursive(
    env: &mut Environment<'static>,
    base_path: &Path,
    current_path: &Path,
) -> Result<()> {
    let read_error = |e: std::io::Error| {
        AppError::Internal(format!("Failed to read templates: {}", e))
    };

    for entry in std::fs::read_dir(current_path).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            let Ok(relative) = path.strip_prefix(base_path) else {
                continue;
            };
            let template_name = relative.to_string_lossy().replace('\\', "/");
            let content = std::fs::read_to_string(&path).map_err(read_error)?;

            // Templates live for the whole process; leaking gives them the 'static lifetime
            let static_name: &'static str = Box::leak(template_name.into_boxed_str());
            let static_content: &'static str = Box::leak(content.into_boxed_str());
            env.add_template(static_name, static_content)?;
            tracing::debug!("Loaded template: {}", static_name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn templates() -> Templates {
        Templates::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")).unwrap()
    }

    #[test]
    fn test_load_finds_all_pages() {
        let templates = templates();
        for name in [
            "base.html",
            "rango/index.html",
            "rango/about.html",
            "rango/category.html",
            "rango/add_category.html",
            "rango/add_page.html",
            "rango/login.html",
            "rango/register.html",
            "rango/restricted.html",
        ] {
            assert!(templates.exists(name), "missing template {}", name);
        }
        assert!(!templates.exists("definitely_not_a_real_template.html"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = Templates::load(Path::new("/definitely/not/a/template/dir"));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_render_escapes_html() {
        let html = templates()
            .render(
                "rango/restricted.html",
                context! { message => "<script>alert(1)</script>", user => () },
            )
            .unwrap();
        assert!(html.0.contains("&lt;script&gt;"));
        assert!(!html.0.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let result = templates().render("nope.html", context! {});
        assert!(matches!(result, Err(AppError::Template(_))));
    }
}
