//! Normalised report request built from filter state.

use serde::Serialize;

use super::filters::{FilterField, FilterState, SortOrder};

/// Page size used when none is configured.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Request parameters sent to the report service.
///
/// Optional fields are `None` whenever the matching filter is empty and are
/// skipped during serialisation, so an empty filter never reaches the wire.
/// `page`, `per_page`, and `sort_order` are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Start of the date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End of the date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// `successful` or `unsuccessful`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_status: Option<String>,
    /// Willingness flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub willing_to_respond: Option<bool>,
    /// Defender flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_patria_defender: Option<bool>,
    /// Department name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// City name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Region name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Neighbourhood name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    /// Respondent gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Age bracket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    /// Socio-economic stratum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stratum: Option<String>,
    /// Identification document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    /// Sort column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl ReportQuery {
    /// Builds a query from filter state and pagination parameters.
    ///
    /// Date presence is not checked here; callers that submit the query must
    /// ensure both dates are set.
    ///
    /// # Example
    ///
    /// ```
    /// use reportero::report::{FilterField, FilterState, ReportQuery};
    ///
    /// let mut filters = FilterState::with_date_range("2024-01-01", "2024-01-31");
    /// filters.set(FilterField::WillingToRespond, "true");
    ///
    /// let query = ReportQuery::build(&filters, 1, 50);
    /// assert_eq!(query.willing_to_respond, Some(true));
    /// assert_eq!(query.city, None);
    /// ```
    #[must_use]
    pub fn build(filters: &FilterState, page: u32, per_page: u32) -> Self {
        let text = |field: FilterField| non_empty(filters.get(field));

        Self {
            page,
            per_page,
            start_date: text(FilterField::StartDate),
            end_date: text(FilterField::EndDate),
            q: text(FilterField::Search),
            survey_status: text(FilterField::SurveyStatus),
            willing_to_respond: filters.tri_state(FilterField::WillingToRespond).as_bool(),
            is_patria_defender: filters.tri_state(FilterField::IsPatriaDefender).as_bool(),
            department: text(FilterField::Department),
            city: text(FilterField::City),
            region: text(FilterField::Region),
            neighborhood: text(FilterField::Neighborhood),
            gender: text(FilterField::Gender),
            age_range: text(FilterField::AgeRange),
            stratum: text(FilterField::Stratum),
            id_type: text(FilterField::IdType),
            sort_by: text(FilterField::SortBy),
            sort_order: filters.sort_order(),
        }
    }

    /// Lists the `(key, value)` pairs that are sent on the wire.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        let optional_text = [
            (FilterField::StartDate, &self.start_date),
            (FilterField::EndDate, &self.end_date),
            (FilterField::Search, &self.q),
            (FilterField::SurveyStatus, &self.survey_status),
        ];
        pairs.extend(
            optional_text
                .into_iter()
                .filter_map(|(field, value)| value.clone().map(|text| (field.key(), text))),
        );
        let flags = [
            (FilterField::WillingToRespond, self.willing_to_respond),
            (FilterField::IsPatriaDefender, self.is_patria_defender),
        ];
        pairs.extend(
            flags
                .into_iter()
                .filter_map(|(field, flag)| flag.map(|value| (field.key(), value.to_string()))),
        );
        let remaining_text = [
            (FilterField::Department, &self.department),
            (FilterField::City, &self.city),
            (FilterField::Region, &self.region),
            (FilterField::Neighborhood, &self.neighborhood),
            (FilterField::Gender, &self.gender),
            (FilterField::AgeRange, &self.age_range),
            (FilterField::Stratum, &self.stratum),
            (FilterField::IdType, &self.id_type),
            (FilterField::SortBy, &self.sort_by),
        ];
        pairs.extend(
            remaining_text
                .into_iter()
                .filter_map(|(field, value)| value.clone().map(|text| (field.key(), text))),
        );
        pairs.push(("sortOrder", self.sort_order.as_str().to_owned()));
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
