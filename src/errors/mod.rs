use std::io;

use axum::{http::StatusCode, response::{IntoResponse, Response}};
use log::error;
use thiserror::Error;

use crate::services::StoreError;

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Template(String),
}

impl From<minijinja::Error> for WikiError {
    fn from(err: minijinja::Error) -> Self {
        WikiError::Template(err.to_string())
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        // The raw error text reaches the client, storage paths included.
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    async fn status_and_text(err: WikiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn every_error_is_a_server_error_with_its_text() {
        let store_io = WikiError::from(StoreError::Io {
            path: PathBuf::from("pages/Home.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        });
        assert_eq!(
            status_and_text(store_io).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "pages/Home.txt: permission denied".to_string()
            )
        );

        let not_found = WikiError::from(StoreError::NotFound("Home".to_string()));
        assert_eq!(
            status_and_text(not_found).await.0,
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let template = WikiError::Template("bad template".to_string());
        assert_eq!(
            status_and_text(template).await,
            (StatusCode::INTERNAL_SERVER_ERROR, "bad template".to_string())
        );
    }
}
