//! Add-cafe form handlers

use crate::error::{AppError, StoreError};
use crate::forms::{CafeForm, FieldErrors, FORM_ERROR_KEY, REQUIRED_MESSAGE};
use crate::pages;
use crate::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, info, warn};

pub async fn show(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_form(&state, &CafeForm::default(), &FieldErrors::default())
}

/// Validate and store a submitted cafe. Any rejection re-renders the form
/// with the submitted values; success redirects to the full listing.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<CafeForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;

    if let Err(e) = state.csrf.verify(&form.csrf_token) {
        warn!("Rejected cafe submission: {}", e);
        let errors = FieldErrors::single(FORM_ERROR_KEY, e.to_string());
        return Ok(render_form(&state, &form, &errors)?.into_response());
    }

    let new_cafe = match form.to_new_cafe() {
        Ok(cafe) => cafe,
        Err(errors) => {
            debug!(?errors, "Cafe submission failed validation");
            return Ok(render_form(&state, &form, &errors)?.into_response());
        }
    };

    match state.db.insert(new_cafe).await {
        Ok(cafe) => {
            info!(id = cafe.id, name = %cafe.name, "Cafe added");
            Ok(Redirect::to("/find.html").into_response())
        }
        Err(StoreError::DuplicateName(name)) => {
            warn!("Cafe name already taken: {}", name);
            let errors = FieldErrors::single("name", format!("A cafe named {name} already exists."));
            Ok(render_form(&state, &form, &errors)?.into_response())
        }
        Err(StoreError::MissingField(field)) => {
            let errors = FieldErrors::single(field, REQUIRED_MESSAGE);
            Ok(render_form(&state, &form, &errors)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn render_form(
    state: &AppState,
    form: &CafeForm,
    errors: &FieldErrors,
) -> Result<Html<String>, AppError> {
    let token = state.csrf.issue()?;
    Ok(Html(pages::add_form_page(form, errors, &token)))
}
