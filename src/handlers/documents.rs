//! Scanner captures. The original UI held camera shots in component state and
//! never persisted them anywhere; the equivalent here is a per-user in-memory
//! store that survives exactly as long as the process. Nothing touches disk
//! or the database.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, format::short_id},
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

/// Captures kept per user; the oldest is evicted beyond this.
const MAX_DOCUMENTS_PER_USER: usize = 16;

#[derive(Debug, Clone)]
struct CapturedDocument {
    id: String,
    file_name: Option<String>,
    data_url: String,
    captured_at: DateTime<Utc>,
}

/// Listing entry; the image payload itself is never echoed back.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: String,
    pub file_name: Option<String>,
    pub size_bytes: usize,
    pub captured_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<Mutex<HashMap<Uuid, Vec<CapturedDocument>>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, user_id: Uuid, doc: CapturedDocument) -> DocumentMeta {
        let meta = DocumentMeta {
            id: doc.id.clone(),
            file_name: doc.file_name.clone(),
            size_bytes: doc.data_url.len(),
            captured_at: doc.captured_at,
        };
        let mut inner = self.inner.lock().unwrap();
        let docs = inner.entry(user_id).or_default();
        docs.push(doc);
        if docs.len() > MAX_DOCUMENTS_PER_USER {
            docs.remove(0);
        }
        meta
    }

    fn list(&self, user_id: Uuid) -> Vec<DocumentMeta> {
        let inner = self.inner.lock().unwrap();
        inner
            .get(&user_id)
            .map(|docs| {
                docs.iter()
                    .map(|d| DocumentMeta {
                        id: d.id.clone(),
                        file_name: d.file_name.clone(),
                        size_bytes: d.data_url.len(),
                        captured_at: d.captured_at,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn clear(&self, user_id: Uuid) {
        self.inner.lock().unwrap().remove(&user_id);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaptureDocumentPayload {
    pub file_name: Option<String>,

    /// Browser-side capture as a `data:image/...` URL.
    #[validate(length(min = 1, message = "The captured image is empty."))]
    pub data_url: String,
}

impl CaptureDocumentPayload {
    fn validate_data_url(&self) -> Result<(), validator::ValidationErrors> {
        if self.data_url.starts_with("data:image/") {
            return Ok(());
        }
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("format");
        err.message = Some("Expected a data:image/... URL.".into());
        errors.add("dataUrl", err);
        Err(errors)
    }
}

#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = CaptureDocumentPayload,
    responses((status = 201, description = "Capture held in memory", body = DocumentMeta)),
    security(("api_jwt" = []))
)]
pub async fn capture_document(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CaptureDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_data_url().map_err(AppError::ValidationError)?;

    let meta = app_state.documents.push(
        user.id,
        CapturedDocument {
            id: short_id(),
            file_name: payload.file_name,
            data_url: payload.data_url,
            captured_at: Utc::now(),
        },
    );
    Ok((StatusCode::CREATED, Json(meta)))
}

#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    responses((status = 200, description = "The caller's held captures", body = [DocumentMeta])),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<Vec<DocumentMeta>> {
    Json(app_state.documents.list(user.id))
}

#[utoipa::path(
    delete,
    path = "/api/documents",
    tag = "Documents",
    responses((status = 204, description = "All captures released")),
    security(("api_jwt" = []))
)]
pub async fn release_documents(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> StatusCode {
    app_state.documents.clear(user.id);
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(store: &DocumentStore, user: Uuid, name: &str) -> DocumentMeta {
        store.push(
            user,
            CapturedDocument {
                id: short_id(),
                file_name: Some(name.to_string()),
                data_url: "data:image/png;base64,AAAA".to_string(),
                captured_at: Utc::now(),
            },
        )
    }

    #[test]
    fn captures_are_scoped_per_user() {
        let store = DocumentStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        capture(&store, alice, "delivery-note.png");
        assert_eq!(store.list(alice).len(), 1);
        assert!(store.list(bob).is_empty());

        store.clear(alice);
        assert!(store.list(alice).is_empty());
    }

    #[test]
    fn oldest_capture_is_evicted_at_the_cap() {
        let store = DocumentStore::new();
        let user = Uuid::new_v4();
        for i in 0..=MAX_DOCUMENTS_PER_USER {
            capture(&store, user, &format!("doc-{i}.png"));
        }
        let docs = store.list(user);
        assert_eq!(docs.len(), MAX_DOCUMENTS_PER_USER);
        assert_eq!(docs[0].file_name.as_deref(), Some("doc-1.png"));
    }
}
