//! A single metered resource discovered on an account.

use crate::client::ApiClient;
use crate::constants::{Source, UtilityType, ENDPOINT_READMETER, ENDPOINT_TARIFF};
use crate::error::Error;
use crate::helpers::resource_path;
use crate::models::{MeterReadResponse, Reading, Tariff, TariffResponse};

/// Gas or electricity resource, fixed at discovery.
///
/// Equality compares the resource id, utility type and source; the client is ignored.
#[derive(Clone, Debug)]
pub struct Utility {
    client: ApiClient,
    resource_id: String,
    utility_type: UtilityType,
    source: Source,
}

impl Utility {
    pub fn new(
        client: ApiClient,
        resource_id: impl Into<String>,
        utility_type: UtilityType,
        source: Source,
    ) -> Self {
        Self {
            client,
            resource_id: resource_id.into(),
            utility_type,
            source,
        }
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn utility_type(&self) -> UtilityType {
        self.utility_type
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Read the current meter value.
    pub async fn read_meter(&self) -> Result<Reading, Error> {
        let url = self
            .client
            .endpoint(&resource_path(&self.resource_id, ENDPOINT_READMETER))?;
        let res: MeterReadResponse = self.client.get_json(url).await?;
        Reading::from_response(&self.resource_id, self.utility_type, self.source, res)
    }

    /// Get the current tariff.
    pub async fn get_tariff(&self) -> Result<Tariff, Error> {
        let url = self
            .client
            .endpoint(&resource_path(&self.resource_id, ENDPOINT_TARIFF))?;
        let res: TariffResponse = self.client.get_json(url).await?;
        Ok(res.into())
    }

    /// Use a different client for subsequent requests.
    pub fn update_client(&mut self, client: ApiClient) {
        self.client = client;
    }
}

impl PartialEq for Utility {
    fn eq(&self, other: &Self) -> bool {
        self.resource_id == other.resource_id
            && self.utility_type == other.utility_type
            && self.source == other.source
    }
}

impl Eq for Utility {}
