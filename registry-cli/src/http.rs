//! reqwest implementation of the registry endpoints

use async_trait::async_trait;
use institution_core::api::{
    application_number_path, application_path, applications_by_institution_path,
    applications_by_status_path, applications_by_type_path, code_path, institution_path,
    status_path, transition_path, ApplicationApi, InstitutionApi, APPLICATIONS_PATH,
    INSTITUTIONS_PATH,
};
use institution_core::application::{
    Application, ApplicationPayload, RejectionRequest, Transition,
};
use institution_core::config::ClientConfig;
use institution_core::dto::{InstitutionPayload, MedicalInstitution};
use institution_core::error::{check_status, ApiError};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

pub struct ReqwestApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        builder: RequestBuilder,
    ) -> institution_core::Result<Response> {
        tracing::debug!("{} {}", method, url);
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{method} {url} failed: {e}")))?;
        let status = response.status().as_u16();
        tracing::debug!("{} {} -> {}", method, url, status);
        check_status(method, url, status)?;
        Ok(response)
    }

    /// Sends and decodes the response body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        builder: RequestBuilder,
    ) -> institution_core::Result<T> {
        let response = self.send(method, url, builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("{method} {url}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> institution_core::Result<T> {
        let url = self.config.url(path);
        self.fetch("GET", &url, self.client.get(&url)).await
    }

    async fn post_transition(
        &self,
        id: i64,
        transition: Transition,
        body: Option<&RejectionRequest>,
    ) -> institution_core::Result<Application> {
        let url = self.config.url(&transition_path(id, transition));
        let builder = match body {
            Some(body) => self.client.post(&url).json(body),
            None => self.client.post(&url),
        };
        self.fetch("POST", &url, builder).await
    }
}

#[async_trait(?Send)]
impl InstitutionApi for ReqwestApi {
    async fn list(&self) -> institution_core::Result<Vec<MedicalInstitution>> {
        self.get_json(INSTITUTIONS_PATH).await
    }

    async fn get(&self, id: i64) -> institution_core::Result<MedicalInstitution> {
        self.get_json(&institution_path(id)).await
    }

    async fn find_by_code(&self, code: &str) -> institution_core::Result<MedicalInstitution> {
        self.get_json(&code_path(code)).await
    }

    async fn list_by_status(
        &self,
        status: &str,
    ) -> institution_core::Result<Vec<MedicalInstitution>> {
        self.get_json(&status_path(status)).await
    }

    async fn create(&self, payload: &InstitutionPayload) -> institution_core::Result<()> {
        let url = self.config.url(INSTITUTIONS_PATH);
        self.send("POST", &url, self.client.post(&url).json(payload))
            .await
            .map(|_| ())
    }

    async fn update(&self, id: i64, payload: &InstitutionPayload) -> institution_core::Result<()> {
        let url = self.config.url(&institution_path(id));
        self.send("PUT", &url, self.client.put(&url).json(payload))
            .await
            .map(|_| ())
    }

    async fn delete(&self, id: i64) -> institution_core::Result<()> {
        let url = self.config.url(&institution_path(id));
        self.send("DELETE", &url, self.client.delete(&url))
            .await
            .map(|_| ())
    }
}

#[async_trait(?Send)]
impl ApplicationApi for ReqwestApi {
    async fn list_applications(&self) -> institution_core::Result<Vec<Application>> {
        self.get_json(APPLICATIONS_PATH).await
    }

    async fn get_application(&self, id: i64) -> institution_core::Result<Application> {
        self.get_json(&application_path(id)).await
    }

    async fn find_application_by_number(
        &self,
        number: &str,
    ) -> institution_core::Result<Application> {
        self.get_json(&application_number_path(number)).await
    }

    async fn list_applications_by_institution(
        &self,
        institution_id: i64,
    ) -> institution_core::Result<Vec<Application>> {
        self.get_json(&applications_by_institution_path(institution_id))
            .await
    }

    async fn list_applications_by_status(
        &self,
        status: &str,
    ) -> institution_core::Result<Vec<Application>> {
        self.get_json(&applications_by_status_path(status)).await
    }

    async fn list_applications_by_type(
        &self,
        application_type: &str,
    ) -> institution_core::Result<Vec<Application>> {
        self.get_json(&applications_by_type_path(application_type))
            .await
    }

    async fn create_application(
        &self,
        payload: &ApplicationPayload,
    ) -> institution_core::Result<Application> {
        let url = self.config.url(APPLICATIONS_PATH);
        self.fetch("POST", &url, self.client.post(&url).json(payload))
            .await
    }

    async fn delete_application(&self, id: i64) -> institution_core::Result<()> {
        let url = self.config.url(&application_path(id));
        self.send("DELETE", &url, self.client.delete(&url))
            .await
            .map(|_| ())
    }

    async fn submit_application(&self, id: i64) -> institution_core::Result<Application> {
        self.post_transition(id, Transition::Submit, None).await
    }

    async fn approve_application(&self, id: i64) -> institution_core::Result<Application> {
        self.post_transition(id, Transition::Approve, None).await
    }

    async fn reject_application(
        &self,
        id: i64,
        body: &RejectionRequest,
    ) -> institution_core::Result<Application> {
        self.post_transition(id, Transition::Reject, Some(body))
            .await
    }
}
