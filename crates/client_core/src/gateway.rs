//! Remote data gateway: the REST backend that persists employees and attendance.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::RecordId,
    error::ApiErrorBody,
    protocol::{AttendanceRecord, Employee, EmployeeDraft, MarkAttendanceRequest},
};
use tracing::debug;
use url::Url;

use crate::error::GatewayError;

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>, GatewayError>;
    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError>;
    async fn delete_employee(&self, id: &RecordId) -> Result<(), GatewayError>;
    async fn list_attendance(&self, employee_id: &str)
        -> Result<Vec<AttendanceRecord>, GatewayError>;
    async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, GatewayError>;
}

pub struct HttpGateway {
    http: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, GatewayError> {
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Client)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded segments to the base url, keeping any prefix
    /// path the base url already carries.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn send(path: &str, request: reqwest::RequestBuilder) -> Result<Response, GatewayError> {
    debug!(path, "gateway request");
    let response = request
        .send()
        .await
        .map_err(|source| GatewayError::Transport {
            path: path.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message());
    Err(GatewayError::status(path, status, detail))
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, GatewayError> {
    response
        .json::<T>()
        .await
        .map_err(|source| GatewayError::Decode {
            path: path.to_string(),
            source,
        })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_employees(&self) -> Result<Vec<Employee>, GatewayError> {
        let url = self.endpoint(&["api", "employees"])?;
        let path = url.path().to_string();
        let response = send(&path, self.http.get(url)).await?;
        let employees: Option<Vec<Employee>> = decode(&path, response).await?;
        Ok(employees.unwrap_or_default())
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError> {
        let url = self.endpoint(&["api", "employees"])?;
        let path = url.path().to_string();
        let response = send(&path, self.http.post(url).json(draft)).await?;
        decode(&path, response).await
    }

    async fn delete_employee(&self, id: &RecordId) -> Result<(), GatewayError> {
        let url = self.endpoint(&["api", "employees", id.as_str()])?;
        let path = url.path().to_string();
        send(&path, self.http.delete(url)).await?;
        Ok(())
    }

    async fn list_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, GatewayError> {
        let url = self.endpoint(&["api", "attendance", "employee", employee_id])?;
        let path = url.path().to_string();
        let response = send(&path, self.http.get(url)).await?;
        let records: Option<Vec<AttendanceRecord>> = decode(&path, response).await?;
        Ok(records.unwrap_or_default())
    }

    async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, GatewayError> {
        let url = self.endpoint(&["api", "attendance"])?;
        let path = url.path().to_string();
        let response = send(&path, self.http.post(url).json(request)).await?;
        decode(&path, response).await
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
