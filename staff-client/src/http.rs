//! HTTP client for network-based API calls

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shared::{Employee, EmployeeFilter, EmployeeInput, MessageBody};

use crate::{ClientConfig, ClientError, ClientResult};

const EMPLOYEES: [&str; 2] = ["api", "employees"];

/// HTTP client for the staff server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base: Url,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            client,
            base,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus path segments; each segment is percent-encoded
    fn url<I>(&self, segments: I) -> ClientResult<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn employee_url(&self, id: &str) -> ClientResult<Url> {
        self.url(EMPLOYEES.into_iter().chain([id]))
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(%status, body = %text, "Request failed");
            return Err(ClientError::from_status(status, &text));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== Employee API ==========

    /// List employees; absent filter fields are not sent
    pub async fn list_employees(&self, filter: &EmployeeFilter) -> ClientResult<Vec<Employee>> {
        let response = self
            .client
            .get(self.url(EMPLOYEES)?)
            .query(filter)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn get_employee(&self, id: &str) -> ClientResult<Employee> {
        let response = self
            .client
            .get(self.employee_url(id)?)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn create_employee(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        let response = self
            .client
            .post(self.url(EMPLOYEES)?)
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Replace every mutable field of an employee
    pub async fn update_employee(&self, id: &str, input: &EmployeeInput) -> ClientResult<Employee> {
        let response = self
            .client
            .put(self.employee_url(id)?)
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn delete_employee(&self, id: &str) -> ClientResult<MessageBody> {
        let response = self
            .client
            .delete(self.employee_url(id)?)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    // ========== Health ==========

    /// `GET /health`
    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        let response = self.client.get(self.url(["health"])?).send().await?;
        Self::handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url(EMPLOYEES).unwrap().as_str(),
            "http://localhost:5000/api/employees"
        );
        assert_eq!(
            client.url(["health"]).unwrap().as_str(),
            "http://localhost:5000/health"
        );
    }

    #[test]
    fn test_employee_id_is_percent_encoded() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:5000")).unwrap();
        let url = client.employee_url("a/b?c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/employees/a%2Fb%3Fc");
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = HttpClient::new(&ClientConfig::new("http://proxy/staff/")).unwrap();
        assert_eq!(
            client.employee_url("42").unwrap().as_str(),
            "http://proxy/staff/api/employees/42"
        );
    }

    #[test]
    fn test_unparseable_base_url_rejected() {
        let err = HttpClient::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
