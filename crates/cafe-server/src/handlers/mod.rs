//! HTTP handlers

pub mod add;
pub mod cafes;


use crate::error::AppError;
use crate::pages;
use axum::response::Html;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn index() -> Html<String> {
    Html(pages::index_page())
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
