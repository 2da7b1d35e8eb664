//! Portfolio projects.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use crate::api::{ApiError, AppState, optional, required};
use crate::db::QueryBuilder;
use crate::db::schema::{ProjectCreate, ProjectStatus, ProjectUpdate};
use crate::model::Project;
use crate::types::ProjectId;

/// Feature list as sent by the admin form: either `"a, b, c"` or `["a", "b"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Features {
    Text(String),
    List(Vec<String>),
}

impl Features {
    pub fn into_vec(self) -> Vec<String> {
        let items: Vec<String> = match self {
            Features::Text(text) => text.split(',').map(str::to_string).collect(),
            Features::List(list) => list,
        };
        items
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub location: Option<String>,
    pub value: Option<String>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    /// Paths of images stored by the upload service.
    #[serde(default, alias = "image")]
    pub images: Vec<String>,
    pub features: Option<Features>,
    pub teams: Option<u32>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectStatusRequest {
    pub status: ProjectStatus,
}

fn clean_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

/// `POST /api/project/create-project`
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(body) = payload?;

    let create = ProjectCreate {
        title: required(body.title, "title")?,
        description: optional(body.description),
        project_type: required(body.project_type, "type")?,
        location: required(body.location, "location")?,
        value: optional(body.value),
        start_date: required(body.start_date, "startDate")?,
        completion_date: required(body.completion_date, "completionDate")?,
        images: clean_images(body.images),
        features: body.features.map(Features::into_vec).unwrap_or_default(),
        teams: body.teams,
        status: body.status.unwrap_or_default(),
    };

    let record = QueryBuilder::create_project(&state.db, &create).await?;
    info!(project = %record.title, "Project created");
    Ok((StatusCode::CREATED, Json(Project::from(record))))
}

/// `GET /api/project/all-project`: newest first.
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let records = QueryBuilder::list_projects(&state.db).await?;
    Ok(Json(records.into_iter().map(Project::from).collect()))
}

/// `POST /api/project/{id}/update-status`
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    payload: Result<Json<ProjectStatusRequest>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let Json(body) = payload?;

    let record = QueryBuilder::update_project_status(&state.db, &id, body.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(Project::from(record)))
}

/// `PUT /api/project/update/{id}`: merges fields; `images` are appended.
///
/// Blank optional fields count as absent, the same as on create.
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let Json(body) = payload?;

    let update = ProjectUpdate {
        title: body.title.map(|t| required(Some(t), "title")).transpose()?,
        description: optional(body.description),
        project_type: body
            .project_type
            .map(|t| required(Some(t), "type"))
            .transpose()?,
        location: body.location.map(|l| required(Some(l), "location")).transpose()?,
        value: optional(body.value),
        start_date: body
            .start_date
            .map(|d| required(Some(d), "startDate"))
            .transpose()?,
        completion_date: body
            .completion_date
            .map(|d| required(Some(d), "completionDate"))
            .transpose()?,
        images: None,
        features: body.features.map(Features::into_vec),
        teams: body.teams,
        status: body.status,
    };

    let record = QueryBuilder::update_project(&state.db, &id, &update, clean_images(body.images))
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(Project::from(record)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_from_comma_string() {
        let features: Features = serde_json::from_str(r#""Steel girders, 4 lanes,, ""#).unwrap();
        assert_eq!(
            features.into_vec(),
            vec!["Steel girders".to_string(), "4 lanes".to_string()]
        );
    }

    #[test]
    fn test_features_from_list() {
        let features: Features = serde_json::from_str(r#"["A", " B "]"#).unwrap();
        assert_eq!(features.into_vec(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_request_accepts_image_alias() {
        let req: ProjectRequest =
            serde_json::from_str(r#"{"title":"T","image":["uploads/x.jpg"]}"#).unwrap();
        assert_eq!(req.images, vec!["uploads/x.jpg".to_string()]);
    }
}
