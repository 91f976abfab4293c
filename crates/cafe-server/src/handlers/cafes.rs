//! Cafe listing and deletion handlers

use crate::error::AppError;
use crate::pages;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use cafe_types::Cafe;
use tracing::{debug, info};

pub async fn find(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let cafes = state.db.list_all().await?;
    Ok(Html(pages::find_page(&cafes)))
}

pub async fn delete_list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let cafes = state.db.list_by_name().await?;
    Ok(Html(pages::delete_page(&cafes)))
}

/// Delete by id and go back to the delete list. Unknown ids are ignored.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_cafe_id(&raw_id).ok_or(AppError::NotFound)?;

    if state.db.delete(id).await? {
        info!(id, "Cafe deleted");
    } else {
        debug!(id, "Delete of unknown cafe ignored");
    }

    Ok(Redirect::to("/delete.html"))
}

pub async fn api_list(State(state): State<AppState>) -> Result<Json<Vec<Cafe>>, AppError> {
    Ok(Json(state.db.list_all().await?))
}

/// Ids are plain positive decimal integers; signs and other forms don't match.
fn parse_cafe_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
