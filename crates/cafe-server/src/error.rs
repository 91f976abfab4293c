//! Error types for the cafe server

use crate::forms::csrf::CsrfError;
use crate::pages;
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Storage layer failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("A cafe named {0:?} already exists")]
    DuplicateName(String),

    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failures that end a request with an error page
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Csrf(#[from] CsrfError),

    #[error("Unreadable form submission: {0}")]
    BadRequest(#[from] FormRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(pages::error_page(
                    "Page not found",
                    "The page you were looking for does not exist.",
                )),
            )
                .into_response(),
            AppError::BadRequest(rejection) => {
                warn!("Rejected form submission: {}", rejection.body_text());
                (
                    rejection.status(),
                    Html(pages::error_page(
                        "Invalid submission",
                        "The form could not be read. Please go back and submit it again.",
                    )),
                )
                    .into_response()
            }
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(pages::error_page(
                        "Something went wrong",
                        "The server could not complete your request. Please try again later.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
