use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

/// Persisted admin credential (table: `admin`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: RecordId,
    /// Trimmed, lowercased email; unique.
    pub email: String,
    /// bcrypt hash, never the raw password.
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreate {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Department a job opening belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Construction,
    Railways,
    Logistics,
    Engineering,
    Administration,
    Safety,
}

/// Employment type of a job opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    Contract,
    Internship,
}

/// Experience band in years, shared by openings and applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Experience {
    #[default]
    #[serde(rename = "0-2")]
    Entry,
    #[serde(rename = "2-5")]
    Mid,
    #[serde(rename = "5+")]
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
}

/// Review state of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    New,
    Shortlisted,
    Rejected,
    Hired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Upcoming,
    #[default]
    Ongoing,
    Completed,
}

/// Persisted job opening (table: `career`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerRecord {
    pub id: RecordId,
    pub title: String,
    pub department: Department,
    pub location: String,
    pub job_type: JobType,
    pub experience: Experience,
    pub status: JobStatus,
    pub posted_on: Option<Datetime>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub description: String,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new job opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerCreate {
    pub title: String,
    pub department: Department,
    pub location: String,
    pub job_type: JobType,
    pub experience: Experience,
    pub status: JobStatus,
    pub highlights: Vec<String>,
    pub description: String,
}

/// Partial update for a job opening; only present fields are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Persisted job application (table: `applicant`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub experience: Experience,
    pub expected_ctc: Option<String>,
    pub notice: Option<String>,
    pub cover_letter: Option<String>,
    /// Free-text skills, sent with talent-pool submissions.
    pub skills: Option<String>,
    /// Path of the uploaded resume.
    pub resume: String,
    /// Opening applied for; absent for general applications.
    pub job_id: Option<RecordId>,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantCreate {
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
    pub job_id: Option<RecordId>,
    pub job_title: String,
    pub status: ApplicationStatus,
}

/// Persisted portfolio project (table: `project`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub project_type: String,
    pub location: String,
    pub value: Option<String>,
    pub start_date: String,
    pub completion_date: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub teams: Option<u32>,
    pub status: ProjectStatus,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub title: String,
    pub description: Option<String>,
    pub project_type: String,
    pub location: String,
    pub value: Option<String>,
    pub start_date: String,
    pub completion_date: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub teams: Option<u32>,
    pub status: ProjectStatus,
}

/// Partial update for a project; only present fields are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

/// Publication state of a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TenderStatus {
    #[default]
    Live,
    Closed,
    Awarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcurementType {
    #[default]
    Open,
    Limited,
    #[serde(rename = "EOI")]
    Eoi,
    #[serde(rename = "RFP")]
    Rfp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sector {
    #[default]
    Roads,
    Railways,
    Water,
    Buildings,
    Mining,
}

/// Tender document; `url` is the path written by the upload service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderDocument {
    pub name: String,
    pub url: Option<String>,
}

/// Persisted tender notice (table: `tender`). Dates are ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderRecord {
    pub id: RecordId,
    pub title: String,
    pub ref_no: String,
    pub department: Option<String>,
    pub sector: Sector,
    pub procurement: ProcurementType,
    pub location: Option<String>,
    pub est_value_inr: Option<String>,
    pub publish_date: Option<String>,
    pub start_date: Option<String>,
    pub prebid_date: Option<String>,
    /// Bid submission deadline.
    pub submit_by: String,
    pub open_on: Option<String>,
    pub status: TenderStatus,
    #[serde(default)]
    pub documents: Vec<TenderDocument>,
    pub summary: Option<String>,
    pub created_at: Option<Datetime>,
    pub updated_at: Option<Datetime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderCreate {
    pub title: String,
    pub ref_no: String,
    pub department: Option<String>,
    pub sector: Sector,
    pub procurement: ProcurementType,
    pub location: Option<String>,
    pub est_value_inr: Option<String>,
    pub publish_date: Option<String>,
    pub start_date: Option<String>,
    pub prebid_date: Option<String>,
    pub submit_by: String,
    pub open_on: Option<String>,
    pub status: TenderStatus,
    pub documents: Vec<TenderDocument>,
    pub summary: Option<String>,
}

/// Partial update for a tender. `documents`, when present, replaces the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procurement: Option<ProcurementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_value_inr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebid_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TenderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<TenderDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(JobType::FullTime).unwrap(), "Full-time");
        assert_eq!(serde_json::to_value(Experience::Senior).unwrap(), "5+");
        assert_eq!(serde_json::to_value(ProjectStatus::Upcoming).unwrap(), "upcoming");
        assert_eq!(
            serde_json::from_str::<Experience>("\"2-5\"").unwrap(),
            Experience::Mid
        );
        assert!(serde_json::from_str::<Department>("\"Marketing\"").is_err());
        assert_eq!(serde_json::to_value(ProcurementType::Eoi).unwrap(), "EOI");
        assert_eq!(
            serde_json::from_str::<TenderStatus>("\"Awarded\"").unwrap(),
            TenderStatus::Awarded
        );
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = CareerUpdate {
            status: Some(JobStatus::Closed),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"status": "Closed"})
        );
    }
}
