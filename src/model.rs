//! Client-facing views of stored records.
//!
//! Records keep SurrealDB ids and snake_case field names; these views expose
//! plain record keys (as `_id`) and the camelCase names the website expects.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use crate::auth::context::Identity;
use crate::db::schema::*;
use crate::types::{AdminId, ApplicantId, JobId, ProjectId, TenderId};

/// Admin as returned by login and registration. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&AdminRecord> for AdminProfile {
    fn from(record: &AdminRecord) -> Self {
        Self {
            id: AdminId::from_record(&record.id).as_str().to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

impl From<&AdminProfile> for Identity {
    fn from(profile: &AdminProfile) -> Self {
        Identity {
            id: profile.id.clone(),
            name: Some(profile.name.clone()),
            email: profile.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub title: String,
    pub department: Department,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience: Experience,
    pub status: JobStatus,
    pub posted_on: Option<Datetime>,
    pub highlights: Vec<String>,
    pub description: String,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

impl From<CareerRecord> for Job {
    fn from(record: CareerRecord) -> Self {
        Self {
            id: JobId::from_record(&record.id),
            title: record.title,
            department: record.department,
            location: record.location,
            job_type: record.job_type,
            experience: record.experience,
            status: record.status,
            posted_on: record.posted_on,
            highlights: record.highlights,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(rename = "_id")]
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub experience: Experience,
    pub expected_ctc: Option<String>,
    pub notice: Option<String>,
    pub cover_letter: Option<String>,
    pub skills: Option<String>,
    pub resume: String,
    pub job_id: Option<JobId>,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

impl From<ApplicantRecord> for Applicant {
    fn from(record: ApplicantRecord) -> Self {
        Self {
            id: ApplicantId::from_record(&record.id),
            name: record.name,
            email: record.email,
            phone: record.phone,
            location: record.location,
            experience: record.experience,
            expected_ctc: record.expected_ctc,
            notice: record.notice,
            cover_letter: record.cover_letter,
            skills: record.skills,
            resume: record.resume,
            job_id: record.job_id.as_ref().map(JobId::from_record),
            job_title: record.job_title,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: String,
    pub location: String,
    pub value: Option<String>,
    pub start_date: String,
    pub completion_date: String,
    /// Image paths, serialised as `image`.
    #[serde(rename = "image")]
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub teams: Option<u32>,
    pub status: ProjectStatus,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: ProjectId::from_record(&record.id),
            title: record.title,
            description: record.description,
            project_type: record.project_type,
            location: record.location,
            value: record.value,
            start_date: record.start_date,
            completion_date: record.completion_date,
            images: record.images,
            features: record.features,
            teams: record.teams,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    #[serde(rename = "_id")]
    pub id: TenderId,
    pub title: String,
    pub ref_no: String,
    pub department: Option<String>,
    pub sector: Sector,
    pub procurement: ProcurementType,
    pub location: Option<String>,
    #[serde(rename = "estValueINR")]
    pub est_value_inr: Option<String>,
    pub publish_date: Option<String>,
    pub start_date: Option<String>,
    pub prebid_date: Option<String>,
    pub submit_by: String,
    pub open_on: Option<String>,
    pub status: TenderStatus,
    pub documents: Vec<TenderDocument>,
    pub summary: Option<String>,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

impl From<TenderRecord> for Tender {
    fn from(record: TenderRecord) -> Self {
        Self {
            id: TenderId::from_record(&record.id),
            title: record.title,
            ref_no: record.ref_no,
            department: record.department,
            sector: record.sector,
            procurement: record.procurement,
            location: record.location,
            est_value_inr: record.est_value_inr,
            publish_date: record.publish_date,
            start_date: record.start_date,
            prebid_date: record.prebid_date,
            submit_by: record.submit_by,
            open_on: record.open_on,
            status: record.status,
            documents: record.documents,
            summary: record.summary,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
