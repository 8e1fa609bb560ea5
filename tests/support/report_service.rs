//! Wiremock stand-in for the survey report endpoint.

use reportero::report::DEFAULT_REPORT_PATH;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One service survey record.
pub fn survey(index: u64) -> Value {
    json!({
        "_id": format!("survey-{index}"),
        "surveyStatus": "successful",
        "fullName": format!("Persona {index}"),
        "identification": format!("10{index:08}"),
        "city": "Barranquilla",
        "region": "Caribe",
        "willingToRespond": true,
        "isPatriaDefender": false,
        "createdAt": "2024-01-15T20:30:00.000Z"
    })
}

/// Builds the envelope for `page` of a `total_items` report.
pub fn report_page(page: u32, per_page: u32, total_items: u64) -> Value {
    let per_page_items = u64::from(per_page);
    let first = u64::from(page - 1) * per_page_items + 1;
    let last = (u64::from(page) * per_page_items).min(total_items);
    let surveys: Vec<Value> = (first..=last).map(survey).collect();
    json!({
        "data": {
            "surveys": surveys,
            "currentPage": page,
            "itemsPerPage": per_page,
            "totalItems": total_items,
            "totalPages": total_items.div_ceil(per_page_items)
        }
    })
}

/// Mounts one mock per page of a `total_items` report.
pub async fn mount_report(server: &MockServer, per_page: u32, total_items: u64) {
    let pages = u32::try_from(total_items.div_ceil(u64::from(per_page))).unwrap_or(1);
    for page in 1..=pages.max(1) {
        Mock::given(method("GET"))
            .and(path(DEFAULT_REPORT_PATH))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(report_page(page, per_page, total_items)),
            )
            .mount(server)
            .await;
    }
}

/// Mounts a failure answering every report request.
pub async fn mount_failure(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("GET"))
        .and(path(DEFAULT_REPORT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
        .mount(server)
        .await;
}
