//! Endpoints, header names, and resource classification for the Glowmarkt API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Public application identifier sent with every request. Not a secret.
pub const APPLICATION_ID: &str = "b0f1b774-a586-4f72-9edd-27ead8aa7a8d";
pub const BASE_URL: &str = "https://api.glowmarkt.com/api/v0-1/";

pub const HEADER_APPLICATION_ID: &str = "applicationID";
pub const HEADER_TOKEN: &str = "token";

/// Marker in a resource name for usage-reporting streams (as opposed to cost).
pub const API_CONSUMPTION: &str = "consumption";

pub const ENDPOINT_AUTH: &str = "auth";
pub const ENDPOINT_RESOURCE: &str = "resource";
pub const ENDPOINT_READMETER: &str = "meterread";
pub const ENDPOINT_TARIFF: &str = "tariff";

/// Kind of utility a resource meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityType {
    Gas,
    Electricity,
}

impl UtilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UtilityType::Gas => "gas",
            UtilityType::Electricity => "electricity",
        }
    }

    /// Classify a resource by its display name. Anything not naming electricity is gas.
    pub fn from_resource_name(name: &str) -> Self {
        if name.to_lowercase().contains(UtilityType::Electricity.as_str()) {
            UtilityType::Electricity
        } else {
            UtilityType::Gas
        }
    }
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path a reading takes from the meter to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Read via the national Data Communications Company network.
    #[serde(rename = "DCC")]
    Dcc,
    /// Read locally from a smart meter.
    #[serde(rename = "smart meter")]
    SmartMeter,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Dcc => "DCC",
            Source::SmartMeter => "smart meter",
        }
    }

    pub fn from_resource_name(name: &str) -> Self {
        if name.to_lowercase().contains(Source::SmartMeter.as_str()) {
            Source::SmartMeter
        } else {
            Source::Dcc
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a resource name marks a consumption stream.
pub fn is_consumption_resource(name: &str) -> bool {
    name.to_lowercase().contains(API_CONSUMPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_electricity_smart_meter() {
        let name = "Electricity Consumption Smart Meter";
        assert!(is_consumption_resource(name));
        assert_eq!(UtilityType::from_resource_name(name), UtilityType::Electricity);
        assert_eq!(Source::from_resource_name(name), Source::SmartMeter);
    }

    #[test]
    fn defaults_to_gas_and_dcc() {
        let name = "Gas Consumption";
        assert!(is_consumption_resource(name));
        assert_eq!(UtilityType::from_resource_name(name), UtilityType::Gas);
        assert_eq!(Source::from_resource_name(name), Source::Dcc);
    }

    #[test]
    fn cost_streams_are_not_consumption() {
        assert!(!is_consumption_resource("electricity cost"));
        assert!(!is_consumption_resource("Unrelated"));
    }

    #[test]
    fn enums_serialize_to_wire_values() {
        assert_eq!(
            serde_json::to_string(&UtilityType::Electricity).unwrap(),
            "\"electricity\""
        );
        assert_eq!(
            serde_json::to_string(&Source::SmartMeter).unwrap(),
            "\"smart meter\""
        );
        assert_eq!(Source::Dcc.to_string(), "DCC");
    }
}
