use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vidflow_core::aspect;
use vidflow_core::classifier::{in_phase, PhaseSummary};
use vidflow_core::types::Phase;
use vidflow_core::video::{sort_by_schedule, Video};
use vidflow_core::VidError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: Option<String>,
}

impl CategoryQuery {
    fn require(self) -> Result<String, AppError> {
        self.category
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::bad_request("query parameter 'category' is required"))
    }
}

#[derive(serde::Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub phase: Option<String>,
}

fn detail(video: &Video) -> serde_json::Value {
    serde_json::json!({
        "video": video,
        "phase": video.phase(),
        "progress": video.progress(),
    })
}

fn summary(video: &Video) -> serde_json::Value {
    let progress = video.progress();
    serde_json::json!({
        "name": video.name,
        "category": video.category,
        "title": video.title,
        "date": video.date,
        "phase": video.phase(),
        "progress": progress.overall,
        "groups": progress.groups,
    })
}

/// GET /api/videos/phases: item count per phase, in menu order.
pub async fn list_phases(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        let videos = Video::list(&store)?;
        let summary = PhaseSummary::from_videos(&videos);
        Ok::<_, VidError>(serde_json::to_value(summary)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/videos?phase=P: list videos, optionally restricted to one phase.
pub async fn list_videos(
    State(app): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let phase: Option<Phase> = query.phase.as_deref().map(str::parse).transpose()?;

    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        let mut videos = Video::list(&store)?;
        if let Some(phase) = phase {
            videos = in_phase(videos, phase);
        }
        sort_by_schedule(&mut videos);
        let list: Vec<serde_json::Value> = videos.iter().map(summary).collect();
        Ok::<_, VidError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateVideoBody {
    pub name: String,
    pub category: String,
}

/// POST /api/videos: create an empty video and add it to the index.
pub async fn create_video(
    State(app): State<AppState>,
    Json(body): Json<CreateVideoBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        let video = Video::create(&store, &body.name, &body.category)?;
        Ok::<_, VidError>(detail(&video))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/videos/:name?category=C: full record with phase and progress.
pub async fn get_video(
    State(app): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = query.require()?;
    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        let video = Video::load(&store, &name, &category)?;
        Ok::<_, VidError>(detail(&video))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// PUT /api/videos/:name?category=C: replace the whole record. Identity
/// is kept from the stored record; the body's name and category are ignored.
pub async fn replace_video(
    State(app): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CategoryQuery>,
    Json(mut body): Json<Video>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = query.require()?;
    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        let stored = Video::load(&store, &name, &category)?;
        body.name = stored.name;
        body.category = stored.category;
        aspect::normalize(&mut body)?;
        body.save(&store)?;
        Ok::<_, VidError>(detail(&body))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// PATCH /api/videos/:name/:aspect?category=C: update fields of one aspect.
pub async fn update_aspect(
    State(app): State<AppState>,
    Path((name, aspect_key)): Path<(String, String)>,
    Query(query): Query<CategoryQuery>,
    Json(updates): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = query.require()?;
    let aspect = aspect::find(&aspect_key)?;
    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        let mut video = Video::load(&store, &name, &category)?;
        aspect.apply(&mut video, updates)?;
        video.save(&store)?;
        tracing::debug!(name = %video.name, aspect = aspect.key, "aspect updated");
        Ok::<_, VidError>(detail(&video))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/videos/:name?category=C: remove record, script and index entry.
pub async fn delete_video(
    State(app): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = query.require()?;
    let result = tokio::task::spawn_blocking(move || {
        let store = app.store()?;
        Video::delete(&store, &name, &category)?;
        Ok::<_, VidError>(serde_json::json!({
            "name": name,
            "category": category,
            "deleted": true,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
