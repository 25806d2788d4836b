//! HTTP route handlers.

use std::collections::HashMap;
use std::path::Path as FsPath;

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::domain::{CanonicalQuery, DestinationId};
use crate::view::{ResultsSession, ViewState};

use super::state::AppState;
use super::templates::*;

const ERROR_TITLE: &str = "Oops! Something went wrong";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/destinations", get(destinations_page))
        .route("/destinations/:id", get(destination_detail_page))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search form.
async fn index_page() -> Result<Response, AppError> {
    render(&IndexTemplate::default())
}

/// Top destinations for a search.
async fn destinations_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, AppError> {
    let query = CanonicalQuery::from_raw(&params.into());
    let mut session = ResultsSession::mount(state.source.clone(), query);
    session.settle().await;

    render_results(session.state(), session.query(), raw.unwrap_or_default())
}

/// Top destinations with one destination's detail open.
async fn destination_detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, AppError> {
    let query = CanonicalQuery::from_raw(&params.into());
    let mut session = ResultsSession::mount(state.source.clone(), query);
    session.select(DestinationId::new(id));
    session.settle().await;

    render_results(session.state(), session.query(), raw.unwrap_or_default())
}

fn render_results(
    view: &ViewState,
    query: &CanonicalQuery,
    query_string: String,
) -> Result<Response, AppError> {
    if view.shows_error_screen() {
        let template = ErrorTemplate {
            title: ERROR_TITLE.to_string(),
            message: view.error_message.clone().unwrap_or_default(),
        };
        let status = if view.error_is_transport {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::OK
        };
        let html = template.render().map_err(AppError::from)?;
        return Ok((status, Html(html)).into_response());
    }

    let cards = view
        .summaries
        .iter()
        .map(|s| CardView::from_summary(s, query, &query_string))
        .collect();

    let detail = view
        .selected_detail
        .as_ref()
        .filter(|_| view.detail_open)
        .map(|profile| DetailView::new(profile, query));

    render(&DestinationsTemplate {
        cards,
        query_string,
        list_error: view.error_message.clone(),
        detail,
        detail_error: view.detail_error.clone(),
    })
}

fn render(template: &impl Template) -> Result<Response, AppError> {
    let html = template.render()?;
    Ok(Html(html).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal { message } = self;
        error!(%message, "request failed");

        let page = ErrorTemplate {
            title: ERROR_TITLE.to_string(),
            message,
        };
        let body = page
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}"));
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
