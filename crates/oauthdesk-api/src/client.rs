// Async HTTP client for the administration API.
//
// Base path: /api/v1/
// Auth: `Authorization: Bearer <token>`, token supplied per call

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

const API_PREFIX: &str = "/api/v1";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the administration API.
///
/// Stateless with respect to credentials: every verb takes the bearer token
/// of the session it acts for, so the same client can serve any session.
/// Cheap to clone (the inner `reqwest::Client` is reference counted).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a server URL and transport config.
    ///
    /// `base_url` may be the server root (`https://auth.example.com`) or
    /// already point at the API root (`https://auth.example.com/api/v1`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL so that it always ends with `/api/v1/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{API_PREFIX}/"));
        }

        Ok(url)
    }

    /// The normalized API root (always ends with `/api/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"users/7/applications"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn headers(token: &SecretString) -> Result<HeaderMap, Error> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// `GET {path}`, decoding the body into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &SecretString,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .headers(Self::headers(token)?)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// `POST {path}` with a JSON body, decoding the created entity.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: &SecretString,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .headers(Self::headers(token)?)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// `DELETE {path}`. Any response body is discarded.
    pub async fn delete(&self, path: &str, token: &SecretString) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .headers(Self::headers(token)?)
            .send()
            .await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let (message, code) = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => (err.message, err.code),
            Err(_) if raw.trim().is_empty() => (None, None),
            Err(_) => (Some(raw), None),
        };
        let message = message.unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::UNAUTHORIZED => Error::Authentication { message },
            StatusCode::FORBIDDEN => Error::Forbidden { message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Rejected {
                message,
                code,
                status: status.as_u16(),
            },
            _ => Error::Api {
                message,
                code,
                status: status.as_u16(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_prefix() {
        let client = ApiClient::from_reqwest("https://auth.example.com", reqwest::Client::new())
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://auth.example.com/api/v1/");
    }

    #[test]
    fn base_url_keeps_existing_prefix() {
        let client =
            ApiClient::from_reqwest("https://auth.example.com/api/v1/", reqwest::Client::new())
                .unwrap();
        assert_eq!(client.base_url().as_str(), "https://auth.example.com/api/v1/");
    }

    #[test]
    fn base_url_under_subpath() {
        let client =
            ApiClient::from_reqwest("https://example.com/oauth", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://example.com/oauth/api/v1/");
        assert_eq!(
            client.url("/users/7/summary").unwrap().as_str(),
            "https://example.com/oauth/api/v1/users/7/summary"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let token = SecretString::from("abc.def.ghi");
        let headers = ApiClient::headers(&token).unwrap();
        let auth = headers.get(AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        assert_eq!(auth.to_str().unwrap(), "Bearer abc.def.ghi");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn token_with_newline_is_invalid() {
        let token = SecretString::from("abc\ndef");
        assert!(matches!(
            ApiClient::headers(&token),
            Err(Error::InvalidToken(_))
        ));
    }
}
