//! Job openings and applications.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use crate::api::{ApiError, AppState, optional, required};
use crate::db::QueryBuilder;
use crate::db::schema::{
    ApplicantCreate, ApplicationStatus, CareerCreate, CareerUpdate, Department, Experience,
    JobStatus, JobType,
};
use crate::model::{Applicant, Job};
use crate::types::{ApplicantId, EmailAddress, JobId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub experience: Option<Experience>,
    pub status: Option<JobStatus>,
    pub highlights: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub experience: Option<Experience>,
    pub expected_ctc: Option<String>,
    pub notice: Option<String>,
    pub cover_letter: Option<String>,
    pub skills: Option<String>,
    /// Path of the resume stored by the upload service.
    pub resume: Option<String>,
}

/// Job title recorded on applications not tied to an opening.
pub const GENERAL_APPLICATION: &str = "General Application";

#[derive(Debug, Deserialize)]
pub struct ApplicationStatusRequest {
    pub status: ApplicationStatus,
}

fn clean_highlights(highlights: Vec<String>) -> Vec<String> {
    highlights
        .into_iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

fn require_resume(resume: Option<String>) -> Result<String, ApiError> {
    optional(resume).ok_or_else(|| ApiError::Validation("Resume file is required".to_string()))
}

fn applicant_email(raw: Option<&str>) -> Result<String, ApiError> {
    raw.and_then(EmailAddress::parse)
        .map(EmailAddress::into_inner)
        .ok_or_else(|| ApiError::Validation("email is required".to_string()))
}

/// `POST /api/career/create-job`
pub async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<JobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let Json(body) = payload?;

    let create = CareerCreate {
        title: required(body.title, "title")?,
        department: body
            .department
            .ok_or_else(|| ApiError::Validation("department is required".to_string()))?,
        location: required(body.location, "location")?,
        job_type: body.job_type.unwrap_or_default(),
        experience: body.experience.unwrap_or_default(),
        status: body.status.unwrap_or_default(),
        highlights: clean_highlights(body.highlights.unwrap_or_default()),
        description: required(body.description, "description")?,
    };

    let record = QueryBuilder::create_career(&state.db, &create).await?;
    info!(job = %record.title, "Job opening created");
    Ok((StatusCode::CREATED, Json(Job::from(record))))
}

/// `PUT /api/career/update-job/{id}`: merges only the fields provided.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
    payload: Result<Json<JobRequest>, JsonRejection>,
) -> Result<Json<Job>, ApiError> {
    let Json(body) = payload?;

    let title = body.title.map(|t| required(Some(t), "title")).transpose()?;
    let location = body.location.map(|l| required(Some(l), "location")).transpose()?;
    let description = body
        .description
        .map(|d| required(Some(d), "description"))
        .transpose()?;

    let update = CareerUpdate {
        title,
        department: body.department,
        location,
        job_type: body.job_type,
        experience: body.experience,
        status: body.status,
        highlights: body.highlights.map(clean_highlights),
        description,
    };

    let record = QueryBuilder::update_career(&state.db, &id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(Json(Job::from(record)))
}

/// `DELETE /api/career/delete-job/{id}`
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<Job>, ApiError> {
    let record = QueryBuilder::delete_career(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    info!(job = %record.title, "Job opening deleted");
    Ok(Json(Job::from(record)))
}

/// `GET /api/career/all-job`: newest first.
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, ApiError> {
    let records = QueryBuilder::list_careers(&state.db).await?;
    Ok(Json(records.into_iter().map(Job::from).collect()))
}

/// `POST /api/career/apply/{id}`: the job title is copied onto the application.
pub async fn apply(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Json<Applicant>, ApiError> {
    let Json(body) = payload?;

    let resume = require_resume(body.resume)?;

    let job = QueryBuilder::find_career(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    let create = ApplicantCreate {
        name: required(body.name, "name")?,
        email: applicant_email(body.email.as_deref())?,
        phone: Some(required(body.phone, "phone")?),
        location: optional(body.location),
        experience: body
            .experience
            .ok_or_else(|| ApiError::Validation("experience is required".to_string()))?,
        expected_ctc: optional(body.expected_ctc),
        notice: optional(body.notice),
        cover_letter: optional(body.cover_letter),
        skills: optional(body.skills),
        resume,
        job_id: Some(job.id.clone()),
        job_title: job.title.clone(),
        status: ApplicationStatus::default(),
    };

    let record = QueryBuilder::create_applicant(&state.db, &create).await?;
    info!(job = %job.title, "Application received");
    Ok(Json(Applicant::from(record)))
}

/// `POST /api/career/talent-pool`: a general application with no opening attached.
pub async fn talent_pool(
    State(state): State<AppState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Json<Applicant>, ApiError> {
    let Json(body) = payload?;

    let resume = require_resume(body.resume)?;

    let create = ApplicantCreate {
        name: required(body.name, "name")?,
        email: applicant_email(body.email.as_deref())?,
        phone: optional(body.phone),
        location: optional(body.location),
        experience: body.experience.unwrap_or_default(),
        expected_ctc: optional(body.expected_ctc),
        notice: optional(body.notice),
        cover_letter: optional(body.cover_letter),
        skills: optional(body.skills),
        resume,
        job_id: None,
        job_title: GENERAL_APPLICATION.to_string(),
        status: ApplicationStatus::default(),
    };

    let record = QueryBuilder::create_applicant(&state.db, &create).await?;
    info!("Talent pool submission received");
    Ok(Json(Applicant::from(record)))
}

/// `GET /api/career/applications`: newest first.
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Applicant>>, ApiError> {
    let records = QueryBuilder::list_applicants(&state.db).await?;
    Ok(Json(records.into_iter().map(Applicant::from).collect()))
}

/// `PUT /api/career/applications/{id}`: move an application through review.
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicantId>,
    payload: Result<Json<ApplicationStatusRequest>, JsonRejection>,
) -> Result<Json<Applicant>, ApiError> {
    let Json(body) = payload?;

    let record = QueryBuilder::update_applicant_status(&state.db, &id, body.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    Ok(Json(Applicant::from(record)))
}
