use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::model::certification_request::{CertificationRequest, Status, validate_submission};
use crate::store::AppStore;

/// POST /requests body: a certification request sans id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "Alice")]
    pub employee_name: String,
    #[schema(example = "AWS Solutions Architect certification")]
    pub description: String,
    #[schema(example = 500.0)]
    pub estimated_budget: f64,
    #[schema(example = "2026-09-01", format = "date", value_type = String)]
    pub expected_date: NaiveDate,
    pub status: Status,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusPatch {
    pub status: Status,
}

/* =========================
List certification requests
========================= */
#[utoipa::path(
    get,
    path = "/requests",
    responses(
        (status = 200, description = "All certification requests", body = [CertificationRequest])
    ),
    tag = "Requests"
)]
pub async fn list_requests(store: web::Data<AppStore>) -> impl Responder {
    let requests = store.list();
    debug!(count = requests.len(), "Listing certification requests");
    HttpResponse::Ok().json(requests)
}

/* =========================
Create certification request
========================= */
#[utoipa::path(
    post,
    path = "/requests",
    request_body(
        content = CreateRequest,
        description = "Certification request payload (id is assigned server-side)",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Request created", body = CertificationRequest),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Budget must be a positive number"
        }))
    ),
    tag = "Requests"
)]
pub async fn create_request(
    store: web::Data<AppStore>,
    payload: web::Json<CreateRequest>,
) -> impl Responder {
    let payload = payload.into_inner();

    // The client validates before submitting, but the server owns the
    // invariants. Day granularity, local calendar.
    let today = Local::now().date_naive();
    if let Err(e) = validate_submission(
        &payload.description,
        payload.estimated_budget,
        payload.expected_date,
        today,
    ) {
        info!(error = %e, "Rejected certification request");
        return HttpResponse::BadRequest().json(json!({ "message": e.to_string() }));
    }

    let created = store.insert(CertificationRequest {
        id: 0, // assigned by the store
        employee_id: payload.employee_id,
        employee_name: payload.employee_name,
        description: payload.description,
        estimated_budget: payload.estimated_budget,
        expected_date: payload.expected_date,
        status: payload.status,
    });

    info!(id = created.id, employee_id = created.employee_id, "Certification request created");
    HttpResponse::Created().json(created)
}

/* =========================
Update request status
========================= */
#[utoipa::path(
    patch,
    path = "/requests/{id}",
    params(
        ("id" = i64, Path, description = "ID of the certification request")
    ),
    request_body(
        content = StatusPatch,
        description = "New status",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Status updated", body = CertificationRequest),
        (status = 404, description = "Unknown request id", body = Object, example = json!({
            "message": "Not found"
        }))
    ),
    tag = "Requests"
)]
pub async fn update_status(
    store: web::Data<AppStore>,
    path: web::Path<i64>,
    payload: web::Json<StatusPatch>,
) -> impl Responder {
    let id = path.into_inner();

    match store.set_status(id, payload.status) {
        Some(updated) => {
            info!(id, status = updated.status.as_str(), "Request status updated");
            HttpResponse::Ok().json(updated)
        }
        None => {
            info!(id, "Status update for unknown request");
            HttpResponse::NotFound().json(json!({ "message": "Not found" }))
        }
    }
}
