use axum::extract::{Path, Query, State};
use axum::Json;
use vidflow_core::aspect::{self, AspectFields, AspectOverview};
use vidflow_core::store;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct AspectQuery {
    #[serde(default, rename = "videoName")]
    pub video_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// GET /api/editing/aspects?videoName=&category=: all aspects with
/// completion counts. Counts are zero when the video is unspecified or
/// cannot be found.
pub async fn list_aspects(
    State(app): State<AppState>,
    Query(query): Query<AspectQuery>,
) -> Result<Json<AspectOverview>, AppError> {
    let (Some(name), Some(category)) = (query.video_name, query.category) else {
        return Ok(Json(aspect::overview(None)));
    };

    let overview = tokio::task::spawn_blocking(move || {
        let video = app
            .store()
            .ok()
            .map(|s| store::load(&s.path_for(&category, &name)));
        aspect::overview(video.as_ref())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    Ok(Json(overview))
}

/// GET /api/editing/aspects/:key/fields: field metadata for one aspect.
pub async fn get_aspect_fields(Path(key): Path<String>) -> Result<Json<AspectFields>, AppError> {
    Ok(Json(aspect::fields_for(&key)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidflow_core::VidError;

    #[tokio::test]
    async fn unknown_aspect_is_an_error() {
        let err = get_aspect_fields(Path("nope".to_string())).await.unwrap_err();
        assert!(matches!(
            err.0.downcast_ref::<VidError>(),
            Some(VidError::AspectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn uninitialized_project_gives_zero_counts() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        let query = AspectQuery {
            video_name: Some("ghost".to_string()),
            category: Some("ai".to_string()),
        };
        let Json(overview) = list_aspects(State(app), Query(query)).await.unwrap();
        assert!(overview
            .aspects
            .iter()
            .all(|a| a.completed_field_count == 0));
    }
}
