//! Session handling and utility discovery for one Glowmarkt account.

use crate::client::{decode, ApiClient};
use crate::constants::{
    is_consumption_resource, Source, UtilityType, BASE_URL, ENDPOINT_AUTH, ENDPOINT_RESOURCE,
};
use crate::error::Error;
use crate::helpers::parse_base_url;
use crate::models::{LoginRequest, LoginResponse, RawResource};
use crate::utility::Utility;
use reqwest::{Client as HttpClient, StatusCode};
use std::fmt;
use std::time::Duration;

/// Options for building a [`House`].
#[derive(Debug, Clone, Default)]
pub struct HouseConfig {
    /// Pre-configured HTTP client. When set, no user agent or timeout is applied to it.
    pub client: Option<HttpClient>,
    /// API root, defaults to [`BASE_URL`].
    pub base_url: Option<String>,
    /// User agent for the client built when `client` is unset.
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

/// A household's smart meters, reached through one authenticated session.
pub struct House {
    client: ApiClient,
    token: Option<String>,
}

impl fmt::Debug for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("House")
            .field("client", &self.client)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl House {
    pub fn new() -> Result<Self, Error> {
        Self::with_config(HouseConfig::default())
    }

    pub fn with_config(config: HouseConfig) -> Result<Self, Error> {
        let base_url = parse_base_url(config.base_url.as_deref().unwrap_or(BASE_URL))?;
        let http = match config.client {
            Some(client) => client,
            None => {
                let user_agent = config
                    .user_agent
                    .unwrap_or_else(|| format!("glowmarkt-rs/{}", crate::VERSION));
                let mut builder = HttpClient::builder().user_agent(user_agent);
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };
        Ok(Self {
            client: ApiClient::new(http, base_url)?,
            token: None,
        })
    }

    /// Client shared with discovered utilities; hand it to [`Utility::update_client`].
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Log in, reusing the current token if the API still accepts it.
    ///
    /// Returns `Ok(false)` when the credentials are rejected. Transport failures are errors.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<bool, Error> {
        let url = self.client.endpoint(ENDPOINT_AUTH)?;

        if let Some(token) = &self.token {
            self.client.set_token(token)?;
            let res = self.client.get(url.clone()).await?;
            if res.status() == StatusCode::OK {
                tracing::debug!("glowmarkt session token still valid");
                return Ok(true);
            }
            tracing::warn!(status = res.status().as_u16(), "glowmarkt session token rejected");
            self.token = None;
            self.client.clear_token();
        }

        let res = self
            .client
            .post_json(url.clone(), &LoginRequest { username, password })
            .await?;
        if res.status() != StatusCode::OK {
            tracing::warn!(status = res.status().as_u16(), "glowmarkt login rejected");
            return Ok(false);
        }
        let login: LoginResponse = decode(url.path(), res).await?;
        self.client.set_token(&login.token)?;
        self.token = Some(login.token);
        tracing::info!("authenticated with glowmarkt");
        Ok(true)
    }

    /// List the account's consumption resources, in the order the API returns them.
    pub async fn discover_utilities(&self) -> Result<Vec<Utility>, Error> {
        let url = self.client.endpoint(ENDPOINT_RESOURCE)?;
        let resources: Vec<RawResource> = self.client.get_json(url).await?;
        let total = resources.len();
        let utilities: Vec<Utility> = resources
            .into_iter()
            .filter(|r| is_consumption_resource(&r.name))
            .map(|r| {
                Utility::new(
                    self.client.clone(),
                    r.resource_id,
                    UtilityType::from_resource_name(&r.name),
                    Source::from_resource_name(&r.name),
                )
            })
            .collect();
        tracing::debug!(total, found = utilities.len(), "discovered glowmarkt utilities");
        Ok(utilities)
    }
}
