//! Page Routes
//!
//! - GET /api/v1/pages - All pages with route and metadata
//! - GET /api/v1/pages/:slug - One page's metadata

use axum::{extract::Path, Json};

use crate::api::dto::PageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::pages::Page;

/// GET /api/v1/pages
pub async fn list_pages() -> Json<Vec<PageResponse>> {
    Json(Page::all().into_iter().map(PageResponse::from).collect())
}

/// GET /api/v1/pages/:slug
pub async fn get_page(Path(slug): Path<String>) -> ApiResult<Json<PageResponse>> {
    let page = Page::from_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Page '{}' not found", slug)))?;
    Ok(Json(PageResponse::from(page)))
}
