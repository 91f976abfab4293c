//! Add-cafe form

use super::{escape, layout};
use crate::forms::{CafeForm, FieldErrors, FieldKind, FORM_ERROR_KEY, FORM_FIELDS};
use cafe_types::Choice;
use std::fmt::Write;

/// Render the form with the submitted values and any errors next to their
/// fields. `csrf_token` is a freshly issued token.
pub fn add_form_page(form: &CafeForm, errors: &FieldErrors, csrf_token: &str) -> String {
    let mut body = String::from("    <h1>Add a New Cafe</h1>\n");

    if let Some(message) = errors.get(FORM_ERROR_KEY) {
        let _ = writeln!(
            body,
            r#"    <div class="alert alert-danger" role="alert">{}</div>"#,
            escape(message)
        );
    }

    body.push_str("    <form method=\"POST\" action=\"/add.html\" novalidate>\n");
    let _ = writeln!(
        body,
        r#"      <input type="hidden" name="csrf_token" value="{}">"#,
        escape(csrf_token)
    );

    for (name, label, kind) in FORM_FIELDS {
        let error = errors.get(name);
        let invalid = if error.is_some() { " is-invalid" } else { "" };
        let value = form.value(name);

        let _ = writeln!(body, r#"      <div class="mb-3">"#);
        let _ = writeln!(
            body,
            r#"        <label class="form-label" for="{name}">{label}</label>"#
        );

        match kind {
            FieldKind::Choice => {
                let _ = writeln!(
                    body,
                    r#"        <select class="form-select{invalid}" id="{name}" name="{name}">"#
                );
                for choice in Choice::ALL {
                    let selected = if value == choice.as_str() { " selected" } else { "" };
                    let _ = writeln!(
                        body,
                        r#"          <option value="{choice}"{selected}>{choice}</option>"#
                    );
                }
                body.push_str("        </select>\n");
            }
            FieldKind::Text | FieldKind::Url => {
                let input_type = if kind == FieldKind::Url { "url" } else { "text" };
                let _ = writeln!(
                    body,
                    r#"        <input class="form-control{invalid}" type="{input_type}" id="{name}" name="{name}" value="{}">"#,
                    escape(value)
                );
            }
        }

        if let Some(message) = error {
            let _ = writeln!(
                body,
                r#"        <div class="invalid-feedback">{}</div>"#,
                escape(message)
            );
        }
        body.push_str("      </div>\n");
    }

    body.push_str(
        r#"      <button type="submit" class="btn btn-primary">Submit</button>
    </form>"#,
    );

    layout("Add a Cafe", &body)
}
