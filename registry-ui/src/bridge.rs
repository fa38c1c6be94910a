//! Browser-side implementations of the backend and confirmation seams.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use institution_core::api::{
    code_path, institution_path, status_path, Confirm, InstitutionApi, INSTITUTIONS_PATH,
};
use institution_core::config::ClientConfig;
use institution_core::dto::{InstitutionPayload, MedicalInstitution};
use institution_core::error::{check_status, ApiError};
use serde::de::DeserializeOwned;

/// Same-origin fetch client for `/api/medical-institutions`.
#[derive(Clone, Debug, Default)]
pub struct HttpBridge {
    config: ClientConfig,
}

impl HttpBridge {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> institution_core::Result<T> {
        let url = self.config.url(path);
        let resp = send("GET", &url, Request::get(&url).send().await)?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("GET {url}: {e}")))
    }

    async fn send_payload(
        &self,
        method: &'static str,
        builder: RequestBuilder,
        url: &str,
        payload: &InstitutionPayload,
    ) -> institution_core::Result<()> {
        let request = builder
            .json(payload)
            .map_err(|e| ApiError::Transport(format!("{method} {url}: {e}")))?;
        send(method, url, request.send().await).map(|_| ())
    }
}

fn send(
    method: &str,
    url: &str,
    result: Result<Response, gloo_net::Error>,
) -> institution_core::Result<Response> {
    tracing::debug!("{} {}", method, url);
    let resp = result.map_err(|e| ApiError::Transport(format!("{method} {url} failed: {e}")))?;
    tracing::debug!("{} {} -> {}", method, url, resp.status());
    check_status(method, url, resp.status())?;
    Ok(resp)
}

#[async_trait(?Send)]
impl InstitutionApi for HttpBridge {
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
        self.send_payload("POST", Request::post(&url), &url, payload)
            .await
    }

    async fn update(&self, id: i64, payload: &InstitutionPayload) -> institution_core::Result<()> {
        let url = self.config.url(&institution_path(id));
        self.send_payload("PUT", Request::put(&url), &url, payload)
            .await
    }

    async fn delete(&self, id: i64) -> institution_core::Result<()> {
        let url = self.config.url(&institution_path(id));
        send("DELETE", &url, Request::delete(&url).send().await).map(|_| ())
    }
}

/// `window.confirm`. A missing window counts as "no".
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
