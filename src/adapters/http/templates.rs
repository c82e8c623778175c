use std::sync::Arc;
use tera::Tera;

/// Template engine wrapper for rendering HTML templates
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Loads templates from `./templates`
  pub fn new() -> Result<Self, tera::Error> {
    Self::from_dir("templates")
  }

  /// Loads every `*.html.tera` file below `dir`
  pub fn from_dir(dir: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(&format!("{}/**/*.html.tera", dir.trim_end_matches('/')))?;
    tera.autoescape_on(vec!["html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}

#[cfg(test)]
pub(crate) fn test_engine() -> TemplateEngine {
  TemplateEngine::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
    .expect("templates should parse")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_all_templates_parse() {
    let engine = test_engine();
    let names: Vec<&str> = engine.tera.get_template_names().collect();

    for expected in [
      "pages/login.html.tera",
      "pages/dashboard.html.tera",
      "pages/section.html.tera",
      "pages/users.html.tera",
      "partials/sidebar.html.tera",
      "partials/login_form.html.tera",
    ] {
      assert!(names.contains(&expected), "missing {expected}");
    }
  }

  #[test]
  fn test_autoescape_is_on() {
    let engine = test_engine();
    let mut context = tera::Context::new();
    context.insert("error", "<script>alert(1)</script>");
    context.insert("email", "");

    let html = engine.render("partials/login_form.html.tera", &context).unwrap();

    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
  }
}
