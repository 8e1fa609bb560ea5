//! Filter state for survey report generation.
//!
//! Every filter is held as a string exactly as the operator typed or selected
//! it. Conversion to typed values happens at the query boundary through
//! [`TriState`] and [`SortOrder`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// A selectable value for an enumerated filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    /// Value stored in the filter state.
    pub value: &'static str,
    /// Label displayed to the operator.
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

const SURVEY_STATUS_OPTIONS: &[FilterOption] = &[
    option("", "Todos"),
    option("successful", "✓ Exitosas"),
    option("unsuccessful", "✗ No Exitosas"),
];

const YES_NO_OPTIONS: &[FilterOption] = &[
    option("", "Todos"),
    option("true", "Sí"),
    option("false", "No"),
];

const GENDER_OPTIONS: &[FilterOption] = &[
    option("", "Todos"),
    option("Masculino", "Masculino"),
    option("Femenino", "Femenino"),
    option("Otro", "Otro"),
];

const AGE_RANGE_OPTIONS: &[FilterOption] = &[
    option("", "Todos"),
    option("18-24", "18-24 años"),
    option("25-34", "25-34 años"),
    option("35-44", "35-44 años"),
    option("45-54", "45-54 años"),
    option("55+", "55+ años"),
];

const STRATUM_OPTIONS: &[FilterOption] = &[
    option("", "Todos"),
    option("1", "1 - Bajo"),
    option("2", "2 - Bajo-Medio"),
    option("3", "3 - Medio"),
    option("4", "4 - Medio-Alto"),
    option("5", "5 - Alto"),
    option("6", "6 - Muy Alto"),
];

const ID_TYPE_OPTIONS: &[FilterOption] = &[
    option("", "Todos"),
    option("CC", "Cédula de Ciudadanía"),
    option("TI", "Tarjeta de Identidad"),
    option("CE", "Cédula de Extranjería"),
    option("PA", "Pasaporte"),
];

const SORT_ORDER_OPTIONS: &[FilterOption] = &[
    option("asc", "Ascendente"),
    option("desc", "Descendente"),
];

/// Names of the fields held by [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Inclusive start of the creation date range (`YYYY-MM-DD`).
    StartDate,
    /// Inclusive end of the creation date range (`YYYY-MM-DD`).
    EndDate,
    /// Free-text search over name and identification.
    Search,
    /// `successful` or `unsuccessful`.
    SurveyStatus,
    /// Tri-state willingness flag.
    WillingToRespond,
    /// Tri-state defender flag.
    IsPatriaDefender,
    /// Department name.
    Department,
    /// City name.
    City,
    /// Region name.
    Region,
    /// Neighbourhood name.
    Neighborhood,
    /// Respondent gender.
    Gender,
    /// Respondent age bracket.
    AgeRange,
    /// Socio-economic stratum, `1` to `6`.
    Stratum,
    /// Identification document type.
    IdType,
    /// Backend field to sort by.
    SortBy,
    /// `asc` or `desc`.
    SortOrder,
}

impl FilterField {
    /// Every field, in filter panel order.
    pub const ALL: [Self; 16] = [
        Self::StartDate,
        Self::EndDate,
        Self::Search,
        Self::SurveyStatus,
        Self::WillingToRespond,
        Self::IsPatriaDefender,
        Self::Gender,
        Self::AgeRange,
        Self::Stratum,
        Self::IdType,
        Self::Department,
        Self::City,
        Self::Region,
        Self::Neighborhood,
        Self::SortBy,
        Self::SortOrder,
    ];

    /// Returns the camelCase name used on the wire and in `--filters`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Search => "q",
            Self::SurveyStatus => "surveyStatus",
            Self::WillingToRespond => "willingToRespond",
            Self::IsPatriaDefender => "isPatriaDefender",
            Self::Department => "department",
            Self::City => "city",
            Self::Region => "region",
            Self::Neighborhood => "neighborhood",
            Self::Gender => "gender",
            Self::AgeRange => "ageRange",
            Self::Stratum => "stratum",
            Self::IdType => "idType",
            Self::SortBy => "sortBy",
            Self::SortOrder => "sortOrder",
        }
    }

    /// Returns the label shown in the filter panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StartDate => "Desde",
            Self::EndDate => "Hasta",
            Self::Search => "Buscar por nombre o ID",
            Self::SurveyStatus => "Estado de la Encuesta",
            Self::WillingToRespond => "Dispuesto a Responder",
            Self::IsPatriaDefender => "Defensor de la Patria",
            Self::Department => "Departamento",
            Self::City => "Ciudad",
            Self::Region => "Región",
            Self::Neighborhood => "Barrio",
            Self::Gender => "Género",
            Self::AgeRange => "Rango de Edad",
            Self::Stratum => "Estrato Socioeconómico",
            Self::IdType => "Tipo de Identificación",
            Self::SortBy => "Ordenar por",
            Self::SortOrder => "Orden",
        }
    }

    /// Returns the selectable values for enumerated fields.
    ///
    /// Free-text and date fields return an empty slice.
    #[must_use]
    pub const fn options(self) -> &'static [FilterOption] {
        match self {
            Self::SurveyStatus => SURVEY_STATUS_OPTIONS,
            Self::WillingToRespond | Self::IsPatriaDefender => YES_NO_OPTIONS,
            Self::Gender => GENDER_OPTIONS,
            Self::AgeRange => AGE_RANGE_OPTIONS,
            Self::Stratum => STRATUM_OPTIONS,
            Self::IdType => ID_TYPE_OPTIONS,
            Self::SortOrder => SORT_ORDER_OPTIONS,
            Self::StartDate
            | Self::EndDate
            | Self::Search
            | Self::Department
            | Self::City
            | Self::Region
            | Self::Neighborhood
            | Self::SortBy => &[],
        }
    }

    /// Returns true for fields encoded as `''`, `'true'`, or `'false'`.
    #[must_use]
    pub const fn is_tri_state(self) -> bool {
        matches!(self, Self::WillingToRespond | Self::IsPatriaDefender)
    }

    /// Returns true for the two date range fields.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::StartDate | Self::EndDate)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterField {
    type Err = ReportError;

    /// Parses a field from its wire key, ignoring case, `_`, and `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == wanted)
            .ok_or_else(|| ReportError::UnknownFilterField { name: s.to_owned() })
    }
}

/// Three-valued reading of a `''|'true'|'false'` filter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    /// No preference; the field is omitted from queries.
    #[default]
    Unset,
    /// Only records where the flag is true.
    True,
    /// Only records where the flag is false.
    False,
}

impl TriState {
    /// Reads a filter string. Anything other than `true` or `false` is unset.
    #[must_use]
    pub fn from_filter_value(value: &str) -> Self {
        match value {
            "true" => Self::True,
            "false" => Self::False,
            "" => Self::Unset,
            other => {
                tracing::debug!(value = other, "ignoring unrecognised tri-state value");
                Self::Unset
            }
        }
    }

    /// Returns the boolean this state selects, if any.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::True => Some(true),
            Self::False => Some(false),
        }
    }
}

/// Sort direction sent with every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Reads a filter string, treating anything other than `desc` as ascending.
    #[must_use]
    pub fn from_filter_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Current filter values for a report.
///
/// All values are strings; empty means "not filtered". `sort_order` always
/// holds a value and defaults to `asc`.
///
/// # Example
///
/// ```
/// use reportero::report::{FilterField, FilterState};
///
/// let mut filters = FilterState::default();
/// filters.set(FilterField::City, "Barranquilla");
/// assert_eq!(filters.get(FilterField::City), "Barranquilla");
/// assert_eq!(filters.active_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    start_date: String,
    end_date: String,
    q: String,
    survey_status: String,
    willing_to_respond: String,
    is_patria_defender: String,
    department: String,
    city: String,
    region: String,
    neighborhood: String,
    gender: String,
    age_range: String,
    stratum: String,
    id_type: String,
    sort_by: String,
    sort_order: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            end_date: String::new(),
            q: String::new(),
            survey_status: String::new(),
            willing_to_respond: String::new(),
            is_patria_defender: String::new(),
            department: String::new(),
            city: String::new(),
            region: String::new(),
            neighborhood: String::new(),
            gender: String::new(),
            age_range: String::new(),
            stratum: String::new(),
            id_type: String::new(),
            sort_by: String::new(),
            sort_order: SortOrder::Asc.as_str().to_owned(),
        }
    }
}

impl FilterState {
    /// Creates an otherwise empty state with the given date range.
    #[must_use]
    pub fn with_date_range(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Self::default()
        }
    }

    const fn slot(&self, field: FilterField) -> &String {
        match field {
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
            FilterField::Search => &self.q,
            FilterField::SurveyStatus => &self.survey_status,
            FilterField::WillingToRespond => &self.willing_to_respond,
            FilterField::IsPatriaDefender => &self.is_patria_defender,
            FilterField::Department => &self.department,
            FilterField::City => &self.city,
            FilterField::Region => &self.region,
            FilterField::Neighborhood => &self.neighborhood,
            FilterField::Gender => &self.gender,
            FilterField::AgeRange => &self.age_range,
            FilterField::Stratum => &self.stratum,
            FilterField::IdType => &self.id_type,
            FilterField::SortBy => &self.sort_by,
            FilterField::SortOrder => &self.sort_order,
        }
    }

    const fn slot_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
            FilterField::Search => &mut self.q,
            FilterField::SurveyStatus => &mut self.survey_status,
            FilterField::WillingToRespond => &mut self.willing_to_respond,
            FilterField::IsPatriaDefender => &mut self.is_patria_defender,
            FilterField::Department => &mut self.department,
            FilterField::City => &mut self.city,
            FilterField::Region => &mut self.region,
            FilterField::Neighborhood => &mut self.neighborhood,
            FilterField::Gender => &mut self.gender,
            FilterField::AgeRange => &mut self.age_range,
            FilterField::Stratum => &mut self.stratum,
            FilterField::IdType => &mut self.id_type,
            FilterField::SortBy => &mut self.sort_by,
            FilterField::SortOrder => &mut self.sort_order,
        }
    }

    /// Overwrites one field, leaving every other field untouched.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Returns the raw string held for a field.
    #[must_use]
    pub fn get(&self, field: FilterField) -> &str {
        self.slot(field).as_str()
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Counts fields holding a non-empty value, excluding `sortOrder`.
    #[must_use]
    pub fn active_count(&self) -> usize {
        FilterField::ALL
            .into_iter()
            .filter(|field| *field != FilterField::SortOrder)
            .filter(|field| !self.get(*field).is_empty())
            .count()
    }

    /// Returns true when both dates hold a value.
    #[must_use]
    pub fn has_date_range(&self) -> bool {
        !self.start_date.is_empty() && !self.end_date.is_empty()
    }

    /// Returns the `(start, end)` date strings.
    #[must_use]
    pub fn date_range(&self) -> (&str, &str) {
        (self.start_date.as_str(), self.end_date.as_str())
    }

    /// Reads a tri-state field. Non tri-state fields always read as unset.
    #[must_use]
    pub fn tri_state(&self, field: FilterField) -> TriState {
        if field.is_tri_state() {
            TriState::from_filter_value(self.get(field))
        } else {
            TriState::Unset
        }
    }

    /// Returns the sort direction, defaulting to ascending.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_filter_value(&self.sort_order)
    }

    /// Applies a comma separated list of `key=value` assignments.
    ///
    /// Keys are parsed with [`FilterField::from_str`]. An empty value clears
    /// the field. The state is left untouched when any assignment is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidFilter`] for an entry without `=` and
    /// [`ReportError::UnknownFilterField`] for an unknown key.
    pub fn apply_assignments(&mut self, assignments: &str) -> Result<(), ReportError> {
        let parsed = assignments
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (key, value) =
                    entry
                        .split_once('=')
                        .ok_or_else(|| ReportError::InvalidFilter {
                            message: format!("expected key=value, got '{entry}'"),
                        })?;
                Ok((key.parse::<FilterField>()?, value.trim().to_owned()))
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        for (field, value) in parsed {
            self.set(field, value);
        }
        Ok(())
    }
}
