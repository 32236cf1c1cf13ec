use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use tower_http::trace::TraceLayer;

use crate::dashboard::Dashboard;
use crate::models::{CryptoRecord, DashboardContext, NewsItem, StockRecord, WeatherRecord};

pub struct AppState {
    pub title: String,
    pub dashboard: Dashboard,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub weather: Option<WeatherRecord>,
    pub news: Vec<NewsItem>,
    pub crypto: Option<Vec<CryptoRecord>>,
    pub stocks: Vec<StockRecord>,
    pub updated_at: String,
}

impl DashboardTemplate {
    pub fn new(title: &str, ctx: DashboardContext) -> Self {
        Self {
            title: title.to_string(),
            weather: ctx.weather,
            news: ctx.news,
            crypto: ctx.crypto,
            stocks: ctx.stocks,
            updated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let ctx = state.dashboard.assemble().await;
    HtmlTemplate(DashboardTemplate::new(&state.title, ctx))
}
