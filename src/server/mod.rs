//! HTTP server: site pages, sitemap, robots and the provider API

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::contact::{ContactForm, ContactFormState, Submission};
use crate::content::{or_empty, ContentApi, PostFilter};
use crate::seo::{build_sitemap, render_xml, RobotsPolicy};
use crate::templates::Pages;
use crate::Site;

/// Posts shown on the home page
pub const FEATURED_LIMIT: usize = 3;

/// Other posts listed under an article
pub const RELATED_LIMIT: usize = 3;

/// Server state
#[derive(Clone)]
pub struct AppState {
    pub api: ContentApi,
    pub pages: Arc<Pages>,
    pub base_url: String,
}

/// Build the full application router
///
/// `api` carries the provider routes when this process also serves the
/// post collection.
pub fn router(state: AppState, public_dir: PathBuf, api: Option<Router>) -> Router {
    let site = Router::new()
        .route("/", get(home))
        .route("/blog", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .with_state(state);

    let app = match api {
        Some(api) => site.merge(api),
        None => site,
    };

    app.fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = AppState {
        api: site.content_api()?,
        pages: Arc::new(site.pages()?),
        base_url: site.base_url(),
    };
    let app = router(state, site.public_dir.clone(), site.provider_routes()?);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn html(status: StatusCode, rendered: Result<String>) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn home(State(state): State<AppState>) -> Response {
    let featured = or_empty(
        state.api.featured_posts(FEATURED_LIMIT).await,
        "featured posts",
    );
    html(StatusCode::OK, state.pages.home(&featured))
}

async fn blog_index(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
) -> Response {
    let all = or_empty(state.api.all_posts().await, "posts");
    let posts = filter.apply(all.clone());
    html(StatusCode::OK, state.pages.blog_list(&all, &posts, &filter))
}

async fn blog_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let lookup = state.api.post_by_slug(&slug).await;
    let meta = state.pages.meta().for_lookup(&lookup);

    match lookup {
        Ok(Some(post)) => {
            let related: Vec<_> = or_empty(state.api.all_posts().await, "related posts")
                .into_iter()
                .filter(|p| p.slug != post.slug)
                .take(RELATED_LIMIT)
                .collect();
            html(StatusCode::OK, state.pages.blog_post(&post, &related))
        }
        Ok(None) => html(StatusCode::NOT_FOUND, state.pages.not_found(&meta)),
        Err(_) => html(
            StatusCode::SERVICE_UNAVAILABLE,
            state.pages.not_found(&meta),
        ),
    }
}

async fn contact_page(State(state): State<AppState>) -> Response {
    html(StatusCode::OK, state.pages.contact(&ContactFormState::new()))
}

async fn contact_submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    let mut form_state = ContactFormState {
        form,
        ..ContactFormState::default()
    };

    match form_state.submit() {
        Submission::Accepted(sent) => {
            tracing::info!(
                "Contact form submitted by {} <{}> ({})",
                sent.name.trim(),
                sent.email.trim(),
                sent.subject.value()
            );
            html(StatusCode::OK, state.pages.contact(&form_state))
        }
        Submission::Rejected => html(
            StatusCode::UNPROCESSABLE_ENTITY,
            state.pages.contact(&form_state),
        ),
    }
}

/// GET /sitemap.xml
async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let posts = state.api.all_posts().await;
    let entries = build_sitemap(&state.base_url, &posts, Utc::now());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_xml(&entries),
    )
        .into_response()
}

/// GET /robots.txt
async fn robots_txt(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        RobotsPolicy::for_site(&state.base_url).to_text(),
    )
        .into_response()
}
