//! HTTP plumbing shared by a house and the utilities discovered from it.

use crate::constants::{APPLICATION_ID, HEADER_APPLICATION_ID, HEADER_TOKEN};
use crate::error::{ApiError, Error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use url::Url;

/// Handle onto the HTTP client and the headers every request carries.
///
/// Clones share the same header state, so a token set through one clone is
/// sent by all of them.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    headers: Arc<RwLock<HeaderMap>>,
}

impl ApiClient {
    pub(crate) fn new(http: HttpClient, base_url: Url) -> Result<Self, Error> {
        let app_id = HeaderName::from_bytes(HEADER_APPLICATION_ID.as_bytes())
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(app_id, HeaderValue::from_static(APPLICATION_ID));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            http,
            base_url,
            headers: Arc::new(RwLock::new(headers)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether requests currently carry a session token.
    pub fn has_token(&self) -> bool {
        self.read_headers().contains_key(HEADER_TOKEN)
    }

    pub(crate) fn set_token(&self, token: &str) -> Result<(), Error> {
        let mut value = HeaderValue::from_str(token).map_err(|_| {
            Error::InvalidHeader(format!("{} is not a valid header value", HEADER_TOKEN))
        })?;
        value.set_sensitive(true);
        self.write_headers().insert(HEADER_TOKEN, value);
        Ok(())
    }

    pub(crate) fn clear_token(&self) {
        self.write_headers().remove(HEADER_TOKEN);
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// GET without status handling; the caller decides what a non-200 means.
    pub(crate) async fn get(&self, url: Url) -> Result<Response, Error> {
        self.send(self.http.get(url)).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Response, Error> {
        self.send(self.http.post(url).json(body)).await
    }

    /// GET and decode a 200 response; any other status is an [`ApiError`].
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let res = self.get(url.clone()).await?;
        decode(url.path(), res).await
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, Error> {
        let headers = self.read_headers().clone();
        let req = req.headers(headers);
        let res = req.send().await?;
        tracing::debug!(
            url = %res.url(),
            status = res.status().as_u16(),
            "glowmarkt request"
        );
        Ok(res)
    }

    fn read_headers(&self) -> RwLockReadGuard<'_, HeaderMap> {
        self.headers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_headers(&self) -> RwLockWriteGuard<'_, HeaderMap> {
        self.headers.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Decode a response body, failing on any status other than 200.
pub(crate) async fn decode<T: DeserializeOwned>(endpoint: &str, res: Response) -> Result<T, Error> {
    let status = res.status();
    if status != StatusCode::OK {
        // An unreadable error body still reports the status.
        let body = res.text().await.ok();
        let data: Option<Value> = body.and_then(|b| serde_json::from_str(&b).ok());
        let msg = data
            .as_ref()
            .and_then(|d| d.get("error").or_else(|| d.get("message")))
            .and_then(|m| m.as_str())
            .unwrap_or("API request failed")
            .to_string();
        return Err(Error::Api(ApiError::new(msg, status.as_u16(), data)));
    }
    let body = res.text().await?;
    serde_json::from_str(&body).map_err(|source| Error::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_base_url;

    fn client() -> ApiClient {
        ApiClient::new(HttpClient::new(), parse_base_url("http://localhost:1").unwrap()).unwrap()
    }

    #[test]
    fn test_default_headers() {
        let c = client();
        let headers = c.read_headers();
        assert_eq!(headers.get(HEADER_APPLICATION_ID).unwrap(), APPLICATION_ID);
        assert!(headers.contains_key("applicationid"));
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(!headers.contains_key(HEADER_TOKEN));
    }

    #[test]
    fn test_token_shared_between_clones() {
        let c = client();
        let other = c.clone();
        c.set_token("abc").unwrap();
        assert!(other.has_token());
        other.clear_token();
        assert!(!c.has_token());
    }

    #[test]
    fn test_rejects_invalid_token() {
        let c = client();
        assert!(matches!(c.set_token("bad\ntoken"), Err(Error::InvalidHeader(_))));
        assert!(!c.has_token());
    }
}
