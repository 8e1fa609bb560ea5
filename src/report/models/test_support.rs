//! Test helpers for constructing report rows and pages.
//!
//! # Examples
//!
//! ```
//! use reportero::report::models::test_support::{page_of, row};
//!
//! let page = page_of(1, 50, 2, vec![row("a", "Ana"), row("b", "Luis")]);
//! assert_eq!(page.total_pages(), 1);
//! assert_eq!(page.rows().len(), 2);
//! ```

use chrono::{DateTime, TimeZone, Utc};

use super::{ReportResult, ReportRow, Socializer, SurveyStatus};

/// Creation timestamp used by [`row`]: 2024-01-15 20:30 UTC, which is
/// 15:30 in Bogotá.
#[must_use]
pub fn fixed_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 20, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Constructs a successful row with only an id and a full name.
#[must_use]
pub fn row(id: &str, full_name: &str) -> ReportRow {
    ReportRow {
        id: id.to_owned(),
        full_name: full_name.to_owned(),
        survey_status: SurveyStatus::Successful,
        created_at: fixed_created_at(),
        ..ReportRow::default()
    }
}

/// Constructs a row with every exported column populated.
#[must_use]
pub fn detailed_row(id: &str, full_name: &str, status: SurveyStatus) -> ReportRow {
    ReportRow {
        identification: Some("1045678901".to_owned()),
        email: Some("ana@example.com".to_owned()),
        phone: Some("3001234567".to_owned()),
        gender: Some("Femenino".to_owned()),
        age_range: Some("25-34".to_owned()),
        stratum: Some(3),
        department: Some("Atlántico".to_owned()),
        city: Some("Barranquilla".to_owned()),
        region: Some("Caribe".to_owned()),
        neighborhood: Some("El Prado".to_owned()),
        is_patria_defender: true,
        willing_to_respond: true,
        survey_status: status,
        socializer: Some(Socializer {
            id: "s-1".to_owned(),
            full_name: "Carlos Ruiz".to_owned(),
            id_number: "998877".to_owned(),
            phone: None,
        }),
        ..row(id, full_name)
    }
}

/// Creates `count` rows with ids `row-1..=row-count`.
#[must_use]
pub fn numbered_rows(count: usize) -> Vec<ReportRow> {
    (1..=count)
        .map(|index| row(&format!("row-{index}"), &format!("Persona {index}")))
        .collect()
}

/// Assembles a page without validation, deriving the page count.
#[must_use]
pub fn page_of(
    current_page: u32,
    items_per_page: u32,
    total_items: u64,
    rows: Vec<ReportRow>,
) -> ReportResult {
    let total_pages = if items_per_page == 0 {
        0
    } else {
        u32::try_from(total_items.div_ceil(u64::from(items_per_page))).unwrap_or(u32::MAX)
    };
    ReportResult {
        current_page,
        items_per_page,
        total_items,
        total_pages,
        rows,
    }
}
