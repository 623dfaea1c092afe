use chrono::{Local, NaiveDate};
use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::requests::CreateRequest;
use crate::model::certification_request::{
    CertificationRequest, Status, ValidationError, validate_submission,
};
use crate::model::user::User;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("{0}")]
    Validation(ValidationError),
}

/// New-request fields as collected by the submission form.
#[derive(Debug, Clone)]
pub struct SubmissionInput {
    pub description: String,
    pub estimated_budget: f64,
    pub expected_date: NaiveDate,
}

/// Client-side owner of the request collection for the current page
/// lifetime. Talks the fixed JSON-over-HTTP contract; the server keeps the
/// authoritative copy.
pub struct RequestRepository {
    client: Client,
    base_url: String,
    requests: Vec<CertificationRequest>,
}

/// The `{message}` body the server sends with non-success responses, with a
/// fallback for anything else.
async fn error_message(response: reqwest::Response) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unexpected response")
            .to_string(),
        Err(_) => "unexpected response".to_string(),
    }
}

/// The form shows the capitalized username as the requester's name.
fn display_name(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl RequestRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        // Paths are appended as "/..."; a trailing slash on the base would
        // produce "//" paths the server's router rejects.
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            requests: Vec::new(),
        }
    }

    /// Local collection as of the last successful fetch or update.
    pub fn requests(&self) -> &[CertificationRequest] {
        &self.requests
    }

    /// POST /login. Returns the authenticated user (with token) on 200.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let message = error_message(response).await;
            info!(%status, "Login rejected");
            return Err(ApiError::Server { status, message });
        }

        let user = response.json::<User>().await?;
        info!(user_id = user.id, role = user.role.as_str(), "Logged in");
        Ok(user)
    }

    /// GET /requests. Success replaces the local collection wholesale; any
    /// failure leaves it untouched and surfaces the error to the caller.
    pub async fn list(&mut self) -> Result<&[CertificationRequest], ApiError> {
        let response = self
            .client
            .get(format!("{}/requests", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response).await;
            warn!(%status, "Fetching requests failed");
            return Err(ApiError::Server { status, message });
        }

        let fetched = response.json::<Vec<CertificationRequest>>().await?;
        debug!(count = fetched.len(), "Fetched request list");
        self.requests = fetched;
        Ok(&self.requests)
    }

    /// Validates and POSTs a new request on behalf of the user; status is
    /// always "submitted" in the current flow. Returns the server-echoed
    /// record with its assigned id. Nothing is assumed about the
    /// authoritative collection on failure.
    pub async fn submit(
        &self,
        user: &User,
        input: &SubmissionInput,
    ) -> Result<CertificationRequest, ApiError> {
        let today = Local::now().date_naive();
        validate_submission(
            &input.description,
            input.estimated_budget,
            input.expected_date,
            today,
        )
        .map_err(ApiError::Validation)?;

        let payload = CreateRequest {
            employee_id: user.id,
            employee_name: display_name(&user.username),
            description: input.description.clone(),
            estimated_budget: input.estimated_budget,
            expected_date: input.expected_date,
            status: Status::Submitted,
        };

        let response = self
            .client
            .post(format!("{}/requests", self.base_url))
            .json(&payload)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            let status = response.status();
            let message = error_message(response).await;
            warn!(%status, "Submission failed");
            return Err(ApiError::Server { status, message });
        }

        let created = response.json::<CertificationRequest>().await?;
        info!(id = created.id, "Submitted certification request");
        Ok(created)
    }

    /// PATCH /requests/{id} with the new status. On success the matching
    /// local record is updated in place; on failure the local collection is
    /// left unchanged and there is no retry.
    pub async fn update_status(
        &mut self,
        id: i64,
        status: Status,
    ) -> Result<CertificationRequest, ApiError> {
        let response = self
            .client
            .patch(format!("{}/requests/{id}", self.base_url))
            .json(&json!({ "status": status }))
            .send()
            .await?;

        if !response.status().is_success() {
            let http_status = response.status();
            let message = error_message(response).await;
            warn!(id, status = %http_status, "Status update failed");
            return Err(ApiError::Server {
                status: http_status,
                message,
            });
        }

        let updated = response.json::<CertificationRequest>().await?;
        if let Some(local) = self.requests.iter_mut().find(|r| r.id == id) {
            local.status = updated.status;
        }
        info!(id, status = updated.status.as_str(), "Status updated");
        Ok(updated)
    }
}
