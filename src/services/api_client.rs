use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use url::Url;

/// Thin request wrapper bound to one API origin. Requests are never
/// retried and carry no client-side timeout.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidInput(format!("Bad API path {}: {}", path, e)))
    }

    pub async fn get<T>(&self, path: &str, bearer: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url), bearer).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        self.send(self.client.post(url).json(body), bearer).await
    }

    async fn send<T>(&self, request: RequestBuilder, bearer: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    tracing::warn!(status = %status, "API request failed: {}", message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Auth(message)),
        _ => Err(Error::network(Some(status), message)),
    }
}

/// Prefers the `error` or `message` field of a JSON error body.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<JsonValue>(body).ok().and_then(|v| {
        ["error", "message"]
            .iter()
            .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
    });

    match from_body {
        Some(msg) if !msg.is_empty() => msg,
        _ if !body.trim().is_empty() && body.len() <= 200 => body.trim().to_string(),
        _ => format!("Request failed with status {}", status),
    }
}
