//! Tender notices managed from the admin back office.

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
    ProcurementType, Sector, TenderCreate, TenderDocument, TenderStatus, TenderUpdate,
};
use crate::model::Tender;
use crate::types::TenderId;

/// A document as sent by the admin form: a bare upload path or `{name, url}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentInput {
    Path(String),
    Entry(TenderDocument),
}

impl DocumentInput {
    fn into_document(self) -> Option<TenderDocument> {
        match self {
            DocumentInput::Path(path) => {
                let path = path.trim();
                if path.is_empty() {
                    return None;
                }
                let name = path.rsplit('/').next().unwrap_or(path).to_string();
                Some(TenderDocument {
                    name,
                    url: Some(path.to_string()),
                })
            }
            DocumentInput::Entry(doc) => {
                let name = doc.name.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                Some(TenderDocument {
                    name,
                    url: optional(doc.url),
                })
            }
        }
    }
}

fn clean_documents(documents: Vec<DocumentInput>) -> Vec<TenderDocument> {
    documents
        .into_iter()
        .filter_map(DocumentInput::into_document)
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderRequest {
    pub title: Option<String>,
    pub ref_no: Option<String>,
    pub department: Option<String>,
    pub sector: Option<Sector>,
    pub procurement: Option<ProcurementType>,
    pub location: Option<String>,
    #[serde(rename = "estValueINR")]
    pub est_value_inr: Option<String>,
    pub publish_date: Option<String>,
    pub start_date: Option<String>,
    pub prebid_date: Option<String>,
    pub submit_by: Option<String>,
    pub open_on: Option<String>,
    pub status: Option<TenderStatus>,
    pub documents: Option<Vec<DocumentInput>>,
    pub summary: Option<String>,
}

/// `GET /api/tender/all-tender` and `GET /api/admin/tenders`: newest first.
pub async fn list_tenders(State(state): State<AppState>) -> Result<Json<Vec<Tender>>, ApiError> {
    let records = QueryBuilder::list_tenders(&state.db).await?;
    Ok(Json(records.into_iter().map(Tender::from).collect()))
}

/// `POST /api/admin/tenders`
pub async fn create_tender(
    State(state): State<AppState>,
    payload: Result<Json<TenderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Tender>), ApiError> {
    let Json(body) = payload?;

    let create = TenderCreate {
        title: required(body.title, "title")?,
        ref_no: required(body.ref_no, "refNo")?,
        department: optional(body.department),
        sector: body.sector.unwrap_or_default(),
        procurement: body.procurement.unwrap_or_default(),
        location: optional(body.location),
        est_value_inr: optional(body.est_value_inr),
        publish_date: optional(body.publish_date),
        start_date: optional(body.start_date),
        prebid_date: optional(body.prebid_date),
        submit_by: required(body.submit_by, "submitBy")?,
        open_on: optional(body.open_on),
        status: body.status.unwrap_or_default(),
        documents: clean_documents(body.documents.unwrap_or_default()),
        summary: optional(body.summary),
    };

    let record = QueryBuilder::create_tender(&state.db, &create).await?;
    info!(tender = %record.ref_no, "Tender published");
    Ok((StatusCode::CREATED, Json(Tender::from(record))))
}

/// `PUT /api/admin/tenders/{id}`: merges fields; `documents` replaces the list.
pub async fn update_tender(
    State(state): State<AppState>,
    Path(id): Path<TenderId>,
    payload: Result<Json<TenderRequest>, JsonRejection>,
) -> Result<Json<Tender>, ApiError> {
    let Json(body) = payload?;

    let update = TenderUpdate {
        title: body.title.map(|t| required(Some(t), "title")).transpose()?,
        ref_no: body.ref_no.map(|r| required(Some(r), "refNo")).transpose()?,
        department: optional(body.department),
        sector: body.sector,
        procurement: body.procurement,
        location: optional(body.location),
        est_value_inr: optional(body.est_value_inr),
        publish_date: optional(body.publish_date),
        start_date: optional(body.start_date),
        prebid_date: optional(body.prebid_date),
        submit_by: body
            .submit_by
            .map(|d| required(Some(d), "submitBy"))
            .transpose()?,
        open_on: optional(body.open_on),
        status: body.status,
        documents: body.documents.map(clean_documents),
        summary: optional(body.summary),
    };

    let record = QueryBuilder::update_tender(&state.db, &id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tender not found".to_string()))?;

    Ok(Json(Tender::from(record)))
}

/// `DELETE /api/admin/tenders/{id}`
pub async fn delete_tender(
    State(state): State<AppState>,
    Path(id): Path<TenderId>,
) -> Result<Json<Tender>, ApiError> {
    let record = QueryBuilder::delete_tender(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tender not found".to_string()))?;

    info!(tender = %record.ref_no, "Tender removed");
    Ok(Json(Tender::from(record)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_accept_paths_and_entries() {
        let docs: Vec<DocumentInput> = serde_json::from_str(
            r#"["uploads/tenders/boq.xlsx", {"name": " NIT.pdf ", "url": ""}, "  ", {"name": ""}]"#,
        )
        .unwrap();

        assert_eq!(
            clean_documents(docs),
            vec![
                TenderDocument {
                    name: "boq.xlsx".to_string(),
                    url: Some("uploads/tenders/boq.xlsx".to_string()),
                },
                TenderDocument {
                    name: "NIT.pdf".to_string(),
                    url: None,
                },
            ]
        );
    }
}
