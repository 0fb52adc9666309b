//! Wire types for the remote wiki API.
//!
//! The API is a single function endpoint; the operation is chosen with an
//! `action` query parameter and bodies are JSON.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, UploadError};

/// Operations exposed by the wiki API that this crate calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Articles,
    UploadImage,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Articles => "articles",
            Action::UploadImage => "upload_image",
        }
    }
}

/// Body of `POST ?action=upload_image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadImageRequest {
    /// The file as a `data:<mime>;base64,<payload>` URL.
    pub image: String,
    pub filename: String,
}

/// Response of `?action=upload_image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadImageResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST`/`PUT ?action=articles`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticlePayload {
    /// Present when updating an existing article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    /// Finalized article HTML.
    pub content: String,
    pub category_id: i64,
    pub preview_image: Option<String>,
}

/// An article as `GET ?action=articles` lists it.
///
/// Everything but `id` and `title` comes from nullable columns or joins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_icon: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub preview_image: Option<String>,
}

/// Response of `GET ?action=articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Error body the API returns alongside non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Turn a raw status + body into an [`ApiError`] when the status is not 2xx.
pub fn check_status(status: u16, body: &[u8]) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    Err(ApiError::Status { status, message })
}

/// Interpret the upload endpoint's answer, yielding the remote image URL.
///
/// Fails on non-2xx, on a body that is not JSON, and on a missing or empty
/// `url` field.
pub fn interpret_upload_response(status: u16, body: &[u8]) -> Result<String, UploadError> {
    check_status(status, body)?;
    let response: UploadImageResponse = serde_json::from_slice(body).map_err(ApiError::Body)?;
    match response.url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(UploadError::MissingUrl),
    }
}

/// Interpret the article listing, newest first as the API sorts it.
pub fn interpret_articles_response(status: u16, body: &[u8]) -> Result<Vec<Article>, ApiError> {
    check_status(status, body)?;
    let response: ArticlesResponse = serde_json::from_slice(body).map_err(ApiError::Body)?;
    Ok(response.articles)
}
