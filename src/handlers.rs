use axum::{
    Form,
    extract::{FromRequest, Multipart, Query, Request},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use log::{info, warn};
use serde::Deserialize;

use crate::components::TemplateName;
use crate::config::EditFallback;
use crate::errors::WikiError;
use crate::routing::Rejected;
use crate::services::{StoreError, filter};
use crate::types::{AppState, Page};

/// Greeting served at `/`
pub const GREETING: &str = "Hello wiki!";

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Handle root path requests
pub async fn index() -> &'static str {
    GREETING
}

/// Anything that is neither `/` nor a page route
pub async fn not_found(uri: Uri) -> Rejected {
    Rejected(uri.path().to_string())
}

/// Show a page, or send the client to the editor if it does not exist yet.
pub async fn view(state: AppState, _request: Request, title: String) -> Result<Response, WikiError> {
    info!("View request for {:?}", title);

    let mut page = match state.store.load(&title) {
        Ok(page) => page,
        Err(StoreError::NotFound(_)) => {
            info!("Page {:?} missing, redirecting to editor", title);
            return Ok(found(&format!("/edit/{title}")));
        }
        Err(e) => return Err(e.into()),
    };

    page.display_body = Some(String::from_utf8_lossy(&filter(&page.body)).into_owned());
    let html = state.templates.render(TemplateName::View, &page)?;
    Ok(Html(html).into_response())
}

/// Show the edit form, blank when there is nothing stored.
pub async fn edit(state: AppState, _request: Request, title: String) -> Result<Response, WikiError> {
    info!("Edit request for {:?}", title);

    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(StoreError::NotFound(_)) => Page::blank(title.as_str()),
        Err(e) => match state.edit_fallback {
            // Indistinguishable from a new page for the client.
            EditFallback::Blank => {
                warn!("Editing {:?} from blank after load failure: {}", title, e);
                Page::blank(title.as_str())
            }
            EditFallback::NotFoundOnly => return Err(e.into()),
        },
    };

    let html = state.templates.render(TemplateName::Edit, &page)?;
    Ok(Html(html).into_response())
}

/// Store the submitted body and redirect to the page view.
pub async fn save(state: AppState, request: Request, title: String) -> Result<Response, WikiError> {
    info!("Save request for {:?}", title);

    let body = match read_body(request, &state).await {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Unreadable form for {:?}: {}", title, rejection.status());
            return Ok(rejection);
        }
    };

    let page = Page::new(title, body.into_bytes());
    state.store.save(&page.title, &page.body)?;
    Ok(found(&format!("/view/{}", page.title)))
}

/// The `body` form field, from a urlencoded or multipart body, or from the
/// query string when the request carries no content type. A missing field
/// is an empty body.
async fn read_body(request: Request, state: &AppState) -> Result<String, Response> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase);

    match content_type.as_deref() {
        None => Query::<SaveForm>::try_from_uri(request.uri())
            .map(|Query(form)| form.body)
            .map_err(IntoResponse::into_response),
        Some(ct) if ct.starts_with("multipart/form-data") => {
            let mut multipart = Multipart::from_request(request, state)
                .await
                .map_err(IntoResponse::into_response)?;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(IntoResponse::into_response)?
            {
                if field.name() == Some("body") {
                    return field.text().await.map_err(IntoResponse::into_response);
                }
            }
            Ok(String::new())
        }
        Some(_) => Form::<SaveForm>::from_request(request, state)
            .await
            .map(|Form(form)| form.body)
            .map_err(IntoResponse::into_response),
    }
}

/// `302 Found` pointing at `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
