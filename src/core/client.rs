use crate::utils::error::{CalcError, Result, GENERIC_FAILURE_MESSAGE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// JSON client for the calculator API. One attempt per call: no retry, timeout or cancellation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_json<Req, Res>(&self, path: &str, data: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let body = serde_json::to_vec(data)?;
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Self::read_json(&url, response).await
    }

    pub async fn get_json<Res: DeserializeOwned>(&self, path: &str) -> Result<Res> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(&url, response).await
    }

    async fn read_json<Res: DeserializeOwned>(url: &str, response: Response) -> Result<Res> {
        let status = response.status();
        tracing::debug!("API response status: {} ({})", status, url);

        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = detail_message(&bytes);
            tracing::warn!("{} failed with {}: {}", url, status, message);
            return Err(CalcError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| CalcError::Decode {
            message: format!("{}: {}", url, e),
        })
    }
}

/// Extracts `detail` from an error body, falling back to the generic message.
fn detail_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(s)),
        }) if !s.is_empty() => s,
        // Validation errors come back as a structured list; keep them readable.
        Ok(ErrorBody {
            detail: Some(other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))),
        }) => other.to_string(),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}
