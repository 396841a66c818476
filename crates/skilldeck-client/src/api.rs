use async_trait::async_trait;
use skilldeck_api::{
    CompetencyDto, CreateCompetencyRequest, ErrorEnvelope, ItemEnvelope, ListEnvelope,
    ReplaceSubItemsRequest, SubItemDto,
};
use std::fmt;
use std::sync::Arc;

/// Transport or server-side failure as seen by the client. The payload is the
/// server's display-safe message when one could be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientError(pub String);

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiClientError {}

/// Seam between the controller and the wire. Production uses
/// [`HttpCompetencyApi`]; tests substitute [`crate::FakeApi`].
#[async_trait]
pub trait CompetencyApi: Send + Sync {
    async fn list(&self) -> Result<ListEnvelope, ApiClientError>;
    async fn create(
        &self,
        request: &CreateCompetencyRequest,
    ) -> Result<CompetencyDto, ApiClientError>;
    async fn replace_sub_items(
        &self,
        id: &str,
        sub_items: &[SubItemDto],
    ) -> Result<CompetencyDto, ApiClientError>;
    async fn delete(&self, id: &str) -> Result<(), ApiClientError>;
}

#[async_trait]
impl<T: CompetencyApi + ?Sized> CompetencyApi for Arc<T> {
    async fn list(&self) -> Result<ListEnvelope, ApiClientError> {
        (**self).list().await
    }

    async fn create(
        &self,
        request: &CreateCompetencyRequest,
    ) -> Result<CompetencyDto, ApiClientError> {
        (**self).create(request).await
    }

    async fn replace_sub_items(
        &self,
        id: &str,
        sub_items: &[SubItemDto],
    ) -> Result<CompetencyDto, ApiClientError> {
        (**self).replace_sub_items(id, sub_items).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiClientError> {
        (**self).delete(id).await
    }
}

pub struct HttpCompetencyApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCompetencyApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn error_from(response: reqwest::Response) -> ApiClientError {
        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => ApiClientError(envelope.message),
            Err(_) => ApiClientError(format!("request failed with status {status}")),
        }
    }

    async fn read_item(response: reqwest::Response) -> Result<CompetencyDto, ApiClientError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let envelope = response
            .json::<ItemEnvelope>()
            .await
            .map_err(|e| ApiClientError(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CompetencyApi for HttpCompetencyApi {
    async fn list(&self) -> Result<ListEnvelope, ApiClientError> {
        let response = self
            .http
            .get(self.url("/competencies"))
            .send()
            .await
            .map_err(|e| ApiClientError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<ListEnvelope>()
            .await
            .map_err(|e| ApiClientError(e.to_string()))
    }

    async fn create(
        &self,
        request: &CreateCompetencyRequest,
    ) -> Result<CompetencyDto, ApiClientError> {
        let response = self
            .http
            .post(self.url("/competencies"))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiClientError(e.to_string()))?;
        Self::read_item(response).await
    }

    async fn replace_sub_items(
        &self,
        id: &str,
        sub_items: &[SubItemDto],
    ) -> Result<CompetencyDto, ApiClientError> {
        let request = ReplaceSubItemsRequest {
            sub_items: sub_items.to_vec(),
        };
        let response = self
            .http
            .put(self.url(&format!("/competencies/{id}/evaluation")))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiClientError(e.to_string()))?;
        Self::read_item(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/competencies/{id}")))
            .send()
            .await
            .map_err(|e| ApiClientError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}
