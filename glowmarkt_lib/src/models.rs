//! Typed readings and tariffs, plus the wire schemas they are decoded from.

use crate::constants::{Source, UtilityType};
use crate::error::Error;
use crate::helpers::{format_timestamp_display, timestamp_from_epoch};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// One entry of the resource listing. Other fields the API sends are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawResource {
    pub name: String,
    #[serde(rename = "resourceId")]
    pub resource_id: String,
}

/// `data` is a series of `[epoch_secs, value]` pairs.
#[derive(Debug, Deserialize)]
pub(crate) struct MeterReadResponse {
    pub data: Vec<(i64, f64)>,
    pub units: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TariffResponse {
    pub structure: TariffStructure,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TariffStructure {
    pub rate: f64,
    pub standing: f64,
}

/// Latest meter reading for a utility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub resource_id: String,
    pub utility_type: UtilityType,
    pub source: Source,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub unit: String,
}

impl Reading {
    /// Build a reading from the last entry of the series. Position wins over
    /// timestamp order; the API is trusted to send the newest value last.
    pub(crate) fn from_response(
        resource_id: &str,
        utility_type: UtilityType,
        source: Source,
        response: MeterReadResponse,
    ) -> Result<Self, Error> {
        let (secs, value) = response
            .data
            .last()
            .copied()
            .ok_or_else(|| Error::EmptySeries {
                resource_id: resource_id.to_string(),
            })?;
        let timestamp = timestamp_from_epoch(secs).ok_or(Error::InvalidTimestamp(secs))?;
        Ok(Self {
            resource_id: resource_id.to_string(),
            utility_type,
            source,
            timestamp,
            value,
            unit: response.units,
        })
    }

    pub fn local_timestamp(&self) -> DateTime<Local> {
        self.timestamp.with_timezone(&Local)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}",
            self.value,
            self.unit,
            format_timestamp_display(self.timestamp, true)
        )
    }
}

/// Current tariff for a utility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tariff {
    pub rate: f64,
    pub standing_charge: f64,
}

impl From<TariffResponse> for Tariff {
    fn from(r: TariffResponse) -> Self {
        Tariff {
            rate: r.structure.rate,
            standing_charge: r.structure.standing,
        }
    }
}
