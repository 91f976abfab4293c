//! Server-rendered HTML pages
//!
//! Every page shares one layout. Values coming from users or the database
//! pass through `escape` before they are interpolated.

mod add;
mod cafes;

pub use add::add_form_page;
pub use cafes::{delete_page, find_page};

use std::fmt::Write;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap already-rendered body markup in the shared page chrome.
pub fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
  <link rel="stylesheet" href="/static/css/styles.css">
</head>
<body>
  <nav class="navbar navbar-expand navbar-dark bg-dark mb-4">
    <div class="container">
      <a class="navbar-brand" href="/">Cafe Catalog</a>
      <ul class="navbar-nav">
        <li class="nav-item"><a class="nav-link" href="/find.html">Find</a></li>
        <li class="nav-item"><a class="nav-link" href="/add.html">Add</a></li>
        <li class="nav-item"><a class="nav-link" href="/delete.html">Delete</a></li>
      </ul>
    </div>
  </nav>
  <main class="container">
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
    );
    html
}

pub fn index_page() -> String {
    layout(
        "Cafe Catalog",
        r#"    <div class="p-5 mb-4 bg-light rounded-3">
      <h1 class="display-5">Cafe Catalog</h1>
      <p class="lead">Find a place to work from, share a new one, or tidy up the list.</p>
      <a class="btn btn-primary" href="/find.html">Find a cafe</a>
      <a class="btn btn-outline-secondary" href="/add.html">Add a cafe</a>
    </div>"#,
    )
}

pub fn error_page(heading: &str, message: &str) -> String {
    let body = format!(
        r#"    <div class="alert alert-danger">
      <h1 class="h4">{}</h1>
      <p class="mb-0">{}</p>
    </div>
    <a href="/">Back to home</a>"#,
        escape(heading),
        escape(message)
    );
    layout(heading, &body)
}
