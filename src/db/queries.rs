// Query helpers for the content tables (careers, applicants, projects).
//
// Lookups by id go through the typed record keys so a key from one table can
// never address another.

use crate::db::schema::*;
use crate::db::Db;
use crate::types::{ApplicantId, JobId, ProjectId, TenderId};
use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use surrealdb::RecordId;

pub struct QueryBuilder;

impl QueryBuilder {
    /// Fetch one record by id, `None` if it does not exist.
    async fn select_one<T: DeserializeOwned>(db: &Db, id: RecordId) -> Result<Option<T>> {
        let mut res = db
            .query("SELECT * FROM $id")
            .bind(("id", id))
            .await?;

        let rows: Vec<T> = res.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Merge `patch` into an existing record. Missing records stay missing.
    async fn merge_one<T, P>(db: &Db, id: RecordId, patch: P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: serde::Serialize + 'static,
    {
        if Self::select_one::<T>(db, id.clone()).await?.is_none() {
            return Ok(None);
        }

        let mut res = db
            .query("UPDATE $id MERGE $patch RETURN AFTER")
            .bind(("id", id))
            .bind(("patch", patch))
            .await?;

        let rows: Vec<T> = res.take(0)?;
        Ok(rows.into_iter().next())
    }

    // ---------------------------------------------------------------------
    // Careers
    // ---------------------------------------------------------------------

    pub async fn create_career(db: &Db, data: &CareerCreate) -> Result<CareerRecord> {
        let mut res = db
            .query("CREATE career CONTENT $data")
            .bind(("data", data.clone()))
            .await?;

        let created: Vec<CareerRecord> = res.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("failed to create career record"))
    }

    /// All openings, newest first.
    pub async fn list_careers(db: &Db) -> Result<Vec<CareerRecord>> {
        let mut res = db
            .query("SELECT * FROM career ORDER BY created_at DESC")
            .await?;
        Ok(res.take(0)?)
    }

    pub async fn find_career(db: &Db, id: &JobId) -> Result<Option<CareerRecord>> {
        Self::select_one(db, id.record_id()).await
    }

    pub async fn update_career(
        db: &Db,
        id: &JobId,
        update: &CareerUpdate,
    ) -> Result<Option<CareerRecord>> {
        Self::merge_one(db, id.record_id(), update.clone()).await
    }

    pub async fn delete_career(db: &Db, id: &JobId) -> Result<Option<CareerRecord>> {
        let mut res = db
            .query("DELETE $id RETURN BEFORE")
            .bind(("id", id.record_id()))
            .await?;

        let deleted: Vec<CareerRecord> = res.take(0)?;
        Ok(deleted.into_iter().next())
    }

    // ---------------------------------------------------------------------
    // Applicants
    // ---------------------------------------------------------------------

    pub async fn create_applicant(db: &Db, data: &ApplicantCreate) -> Result<ApplicantRecord> {
        let mut res = db
            .query("CREATE applicant CONTENT $data")
            .bind(("data", data.clone()))
            .await?;

        let created: Vec<ApplicantRecord> = res.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("failed to create applicant record"))
    }

    /// All applications, newest first.
    pub async fn list_applicants(db: &Db) -> Result<Vec<ApplicantRecord>> {
        let mut res = db
            .query("SELECT * FROM applicant ORDER BY created_at DESC")
            .await?;
        Ok(res.take(0)?)
    }

    pub async fn update_applicant_status(
        db: &Db,
        id: &ApplicantId,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicantRecord>> {
        Self::merge_one(db, id.record_id(), serde_json::json!({ "status": status })).await
    }

    // ---------------------------------------------------------------------
    // Projects
    // ---------------------------------------------------------------------

    pub async fn create_project(db: &Db, data: &ProjectCreate) -> Result<ProjectRecord> {
        let mut res = db
            .query("CREATE project CONTENT $data")
            .bind(("data", data.clone()))
            .await?;

        let created: Vec<ProjectRecord> = res.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("failed to create project record"))
    }

    /// All projects, newest first.
    pub async fn list_projects(db: &Db) -> Result<Vec<ProjectRecord>> {
        let mut res = db
            .query("SELECT * FROM project ORDER BY created_at DESC")
            .await?;
        Ok(res.take(0)?)
    }

    pub async fn find_project(db: &Db, id: &ProjectId) -> Result<Option<ProjectRecord>> {
        Self::select_one(db, id.record_id()).await
    }

    pub async fn update_project_status(
        db: &Db,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<Option<ProjectRecord>> {
        Self::merge_one(db, id.record_id(), serde_json::json!({ "status": status })).await
    }

    /// Merge field updates and append newly uploaded images to the existing list.
    pub async fn update_project(
        db: &Db,
        id: &ProjectId,
        update: &ProjectUpdate,
        new_images: Vec<String>,
    ) -> Result<Option<ProjectRecord>> {
        let Some(existing) = Self::find_project(db, id).await? else {
            return Ok(None);
        };

        let mut patch = update.clone();
        if !new_images.is_empty() {
            let mut images = patch.images.take().unwrap_or(existing.images);
            images.extend(new_images);
            patch.images = Some(images);
        }

        Self::merge_one(db, id.record_id(), patch).await
    }

    // ---------------------------------------------------------------------
    // Tenders
    // ---------------------------------------------------------------------

    pub async fn create_tender(db: &Db, data: &TenderCreate) -> Result<TenderRecord> {
        let mut res = db
            .query("CREATE tender CONTENT $data")
            .bind(("data", data.clone()))
            .await?;

        let created: Vec<TenderRecord> = res.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("failed to create tender record"))
    }

    /// All tenders, newest first.
    pub async fn list_tenders(db: &Db) -> Result<Vec<TenderRecord>> {
        let mut res = db
            .query("SELECT * FROM tender ORDER BY created_at DESC")
            .await?;
        Ok(res.take(0)?)
    }

    pub async fn update_tender(
        db: &Db,
        id: &TenderId,
        update: &TenderUpdate,
    ) -> Result<Option<TenderRecord>> {
        Self::merge_one(db, id.record_id(), update.clone()).await
    }

    pub async fn delete_tender(db: &Db, id: &TenderId) -> Result<Option<TenderRecord>> {
        let mut res = db
            .query("DELETE $id RETURN BEFORE")
            .bind(("id", id.record_id()))
            .await?;

        let deleted: Vec<TenderRecord> = res.take(0)?;
        Ok(deleted.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DatabaseConfig, create_connection, ensure_schema};

    async fn setup_test_db() -> Db {
        let db = create_connection(DatabaseConfig::memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();
        db
    }

    fn career(title: &str) -> CareerCreate {
        CareerCreate {
            title: title.to_string(),
            department: Department::Railways,
            location: "Mumbai".to_string(),
            job_type: JobType::default(),
            experience: Experience::Mid,
            status: JobStatus::default(),
            highlights: vec!["Site work".to_string()],
            description: "Track maintenance supervisor".to_string(),
        }
    }

    fn project(title: &str) -> ProjectCreate {
        ProjectCreate {
            title: title.to_string(),
            description: None,
            project_type: "Bridge".to_string(),
            location: "Pune".to_string(),
            value: Some("12 Cr".to_string()),
            start_date: "2023-01".to_string(),
            completion_date: "2024-06".to_string(),
            images: vec!["uploads/a.jpg".to_string()],
            features: vec!["Steel girders".to_string()],
            teams: Some(40),
            status: ProjectStatus::default(),
        }
    }

    #[tokio::test]
    async fn test_career_create_and_list() {
        let db = setup_test_db().await;

        let first = QueryBuilder::create_career(&db, &career("Site Engineer")).await.unwrap();
        assert_eq!(first.status, JobStatus::Open);
        assert_eq!(first.job_type, JobType::FullTime);
        assert!(first.posted_on.is_some());

        QueryBuilder::create_career(&db, &career("Safety Officer")).await.unwrap();

        let all = QueryBuilder::list_careers(&db).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_career_update_merges_fields() {
        let db = setup_test_db().await;
        let created = QueryBuilder::create_career(&db, &career("Site Engineer")).await.unwrap();
        let id = JobId::from_record(&created.id);

        let update = CareerUpdate {
            status: Some(JobStatus::Closed),
            ..Default::default()
        };
        let updated = QueryBuilder::update_career(&db, &id, &update)
            .await
            .unwrap()
            .expect("career exists");

        assert_eq!(updated.status, JobStatus::Closed);
        assert_eq!(updated.title, "Site Engineer");
        assert_eq!(updated.highlights, vec!["Site work".to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_career_returns_none() {
        let db = setup_test_db().await;
        let update = CareerUpdate {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };

        let result = QueryBuilder::update_career(&db, &JobId::new("missing"), &update)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(QueryBuilder::list_careers(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_career() {
        let db = setup_test_db().await;
        let created = QueryBuilder::create_career(&db, &career("Site Engineer")).await.unwrap();
        let id = JobId::from_record(&created.id);

        assert!(QueryBuilder::delete_career(&db, &id).await.unwrap().is_some());
        assert!(QueryBuilder::find_career(&db, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_applicant_status_update() {
        let db = setup_test_db().await;
        let job = QueryBuilder::create_career(&db, &career("Site Engineer")).await.unwrap();

        let applicant = QueryBuilder::create_applicant(
            &db,
            &ApplicantCreate {
                name: "Ravi".to_string(),
                email: "ravi@example.com".to_string(),
                phone: Some("9999999999".to_string()),
                location: None,
                experience: Experience::Entry,
                expected_ctc: None,
                notice: Some("30 days".to_string()),
                cover_letter: None,
                skills: None,
                resume: "uploads/resumes/ravi.pdf".to_string(),
                job_id: Some(job.id.clone()),
                job_title: job.title.clone(),
                status: ApplicationStatus::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(applicant.status, ApplicationStatus::New);

        let id = ApplicantId::from_record(&applicant.id);
        let updated = QueryBuilder::update_applicant_status(&db, &id, ApplicationStatus::Shortlisted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Shortlisted);
        assert_eq!(updated.job_id, Some(job.id));
    }

    #[tokio::test]
    async fn test_project_update_appends_images() {
        let db = setup_test_db().await;
        let created = QueryBuilder::create_project(&db, &project("Flyover")).await.unwrap();
        let id = ProjectId::from_record(&created.id);

        let update = ProjectUpdate {
            location: Some("Nagpur".to_string()),
            ..Default::default()
        };
        let updated = QueryBuilder::update_project(&db, &id, &update, vec!["uploads/b.jpg".to_string()])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.location, "Nagpur");
        assert_eq!(
            updated.images,
            vec!["uploads/a.jpg".to_string(), "uploads/b.jpg".to_string()]
        );

        let status = QueryBuilder::update_project_status(&db, &id, ProjectStatus::Completed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status.status, ProjectStatus::Completed);
    }

    #[tokio::test]
    async fn test_tender_update_replaces_documents() {
        let db = setup_test_db().await;
        let created = QueryBuilder::create_tender(
            &db,
            &TenderCreate {
                title: "NH-48 resurfacing".to_string(),
                ref_no: "ZE/ROADS/2025/014".to_string(),
                department: None,
                sector: Sector::Roads,
                procurement: ProcurementType::default(),
                location: Some("Surat".to_string()),
                est_value_inr: None,
                publish_date: None,
                start_date: None,
                prebid_date: None,
                submit_by: "2025-03-01T10:00".to_string(),
                open_on: None,
                status: TenderStatus::default(),
                documents: vec![TenderDocument {
                    name: "NIT.pdf".to_string(),
                    url: Some("uploads/tenders/nit.pdf".to_string()),
                }],
                summary: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.status, TenderStatus::Live);
        let id = TenderId::from_record(&created.id);

        let update = TenderUpdate {
            status: Some(TenderStatus::Awarded),
            documents: Some(vec![]),
            ..Default::default()
        };
        let updated = QueryBuilder::update_tender(&db, &id, &update).await.unwrap().unwrap();
        assert_eq!(updated.status, TenderStatus::Awarded);
        assert!(updated.documents.is_empty());
        assert_eq!(updated.ref_no, "ZE/ROADS/2025/014");

        assert!(QueryBuilder::delete_tender(&db, &id).await.unwrap().is_some());
        assert!(QueryBuilder::list_tenders(&db).await.unwrap().is_empty());
        assert!(
            QueryBuilder::update_tender(&db, &id, &update)
                .await
                .unwrap()
                .is_none()
        );
    }
}
