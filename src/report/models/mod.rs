//! Survey report rows and result pages.
//!
//! Rows deserialise directly from the report service. The page envelope is an
//! internal `Api` type that is validated before it becomes a
//! [`ReportResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::error::ReportError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Outcome recorded for a survey visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    /// The respondent completed the survey.
    #[default]
    Successful,
    /// The visit did not produce a completed survey.
    Unsuccessful,
}

impl SurveyStatus {
    /// Returns the display label used in tables and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Successful => "Exitosa",
            Self::Unsuccessful => "No Exitosa",
        }
    }
}

/// Field agent credited with the survey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Socializer {
    /// Backend identifier.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Agent's full name.
    #[serde(default)]
    pub full_name: String,
    /// Agent's identification number.
    #[serde(default)]
    pub id_number: String,
    /// Agent's phone number.
    pub phone: Option<String>,
}

/// Account that owns the survey record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Autor {
    /// Backend identifier.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: String,
}

/// Coded reason attached to unsuccessful visits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReasonOption {
    /// Machine value.
    #[serde(default)]
    pub value: String,
    /// Human readable label.
    #[serde(default)]
    pub label: String,
}

/// One survey record as returned for a report page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Survey outcome.
    pub survey_status: SurveyStatus,
    /// Respondent's full name.
    #[serde(default)]
    pub full_name: String,
    /// Identification document type.
    pub id_type: Option<String>,
    /// Identification number.
    pub identification: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Residential address.
    pub address: Option<String>,
    /// Address where the visit took place.
    pub visit_address: Option<String>,
    /// Age bracket.
    pub age_range: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Socio-economic stratum.
    #[serde(default, deserialize_with = "deserialize_stratum")]
    pub stratum: Option<u8>,
    /// Region name.
    pub region: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Neighbourhood name.
    pub neighborhood: Option<String>,
    /// Whether the respondent agreed to answer.
    #[serde(default)]
    pub willing_to_respond: bool,
    /// Whether the respondent is a "Defensor de la Patria".
    #[serde(default)]
    pub is_patria_defender: bool,
    /// Whether the respondent authorised audio recording.
    #[serde(default)]
    pub recording_authorization: bool,
    /// Reason recorded when the survey was rejected.
    pub rejection_reason: Option<ReasonOption>,
    /// Reason recorded when nobody answered.
    pub no_response_reason: Option<ReasonOption>,
    /// Storage key of the recorded audio.
    pub audio_file_key: Option<String>,
    /// Field agent credited with the survey.
    pub socializer: Option<Socializer>,
    /// Account that owns the record.
    pub autor: Option<Autor>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ReportRow {
    /// Returns the "city, region" summary shown in the location column.
    ///
    /// Falls back to the department when the city is missing.
    #[must_use]
    pub fn location_summary(&self) -> String {
        let place = self
            .city
            .as_deref()
            .or(self.department.as_deref())
            .unwrap_or("-");
        match self.region.as_deref() {
            Some(region) if !region.is_empty() => format!("{place}, {region}"),
            _ => place.to_owned(),
        }
    }

    /// Returns the socializer's name, if one is attached.
    #[must_use]
    pub fn socializer_name(&self) -> Option<&str> {
        self.socializer
            .as_ref()
            .map(|socializer| socializer.full_name.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StratumValue {
    Number(u8),
    Text(String),
}

fn deserialize_stratum<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StratumValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(StratumValue::Number(number)) => Some(number),
        Some(StratumValue::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// One validated page of report rows.
///
/// Service pages pass through [`ReportResult::new`], which enforces that the
/// page does not hold more rows than its page size and that the current page
/// lies within the page count whenever there are items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportResult {
    current_page: u32,
    items_per_page: u32,
    total_items: u64,
    total_pages: u32,
    rows: Vec<ReportRow>,
}

impl ReportResult {
    /// Validates and assembles a result page.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidResponse`] when the page holds more rows
    /// than `items_per_page`, or when `total_items > 0` and `current_page`
    /// falls outside `1..=total_pages`.
    pub fn new(
        current_page: u32,
        items_per_page: u32,
        total_items: u64,
        total_pages: u32,
        rows: Vec<ReportRow>,
    ) -> Result<Self, ReportError> {
        let row_count = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        if row_count > items_per_page {
            return Err(ReportError::InvalidResponse {
                message: format!(
                    "page holds {row_count} rows but the page size is {items_per_page}"
                ),
            });
        }
        if total_items > 0 && !(1..=total_pages).contains(&current_page) {
            return Err(ReportError::InvalidResponse {
                message: format!(
                    "current page {current_page} is outside 1..={total_pages} for {total_items} items"
                ),
            });
        }
        Ok(Self {
            current_page,
            items_per_page,
            total_items,
            total_pages,
            rows,
        })
    }

    /// Returns the 1-based page reported by the service.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Returns the number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Returns the number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns the rows on this page.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Returns true when the page holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Envelope returned by the report endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiReportEnvelope {
    pub(crate) data: ApiReportPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReportPage {
    #[serde(default)]
    surveys: Vec<ReportRow>,
    current_page: u32,
    items_per_page: Option<u32>,
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    total_pages: u32,
}

impl ApiReportPage {
    /// Converts the page, using `requested_per_page` when the service omits
    /// the page size.
    pub(crate) fn into_result(self, requested_per_page: u32) -> Result<ReportResult, ReportError> {
        ReportResult::new(
            self.current_page,
            self.items_per_page.unwrap_or(requested_per_page),
            self.total_items,
            self.total_pages,
            self.surveys,
        )
    }
}
