//! Item catalogue listing with cursor pagination

use crate::error::{Error, Result};
use crate::pagination::{paginate, Cursor, Page, DEFAULT_LIMIT, MAX_LIMIT};
use crate::respond::{negotiated, problem_for, Negotiate, Problem};
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const CURSOR_TYPE: &str = "item";

const CATEGORIES: &[&str] = &[
    "electronics",
    "tools",
    "accessories",
    "robotics",
    "power",
    "components",
];

// ============================================================================
// Models
// ============================================================================

/// A catalogue item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, also the cursor value
    pub id: String,
    /// Display name
    pub name: String,
    /// One of the known category slugs
    pub category: String,
    /// Unit price in cents
    pub price_cents: u32,
}

/// Response payload for the item listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListData {
    /// Items on this page
    pub items: Vec<Item>,
    /// Size of the filtered collection
    pub total: usize,
}

/// Query parameters for the item listing.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListParams {
    /// Opaque resume token from a previous page
    pub cursor: Option<String>,

    /// Items per page, 1-100
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,

    /// Restrict to a single category
    #[validate(custom(function = validate_category))]
    pub category: Option<String>,
}

fn validate_category(category: &str) -> std::result::Result<(), ValidationError> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(ValidationError::new("category").with_message("unknown category".into()))
    }
}

// ============================================================================
// Catalogue
// ============================================================================

fn item(id: &str, name: &str, category: &str, price_cents: u32) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price_cents,
    }
}

/// Static catalogue, ordered by id. The listing relies on this order
/// being stable across requests.
pub(crate) static CATALOGUE: Lazy<Vec<Item>> = Lazy::new(|| {
    vec![
        item("item-01", "USB-C Hub", "electronics", 3490),
        item("item-02", "Mechanical Keyboard", "electronics", 8990),
        item("item-03", "27-inch Monitor", "electronics", 24900),
        item("item-04", "Webcam", "electronics", 5990),
        item("item-05", "Precision Screwdriver Set", "tools", 2450),
        item("item-06", "Digital Caliper", "tools", 3990),
        item("item-07", "Soldering Station", "tools", 11900),
        item("item-08", "Wire Stripper", "tools", 1590),
        item("item-09", "Laptop Stand", "accessories", 4290),
        item("item-10", "Cable Organizer", "accessories", 990),
        item("item-11", "Desk Mat", "accessories", 2190),
        item("item-12", "Monitor Arm", "accessories", 7490),
        item("item-13", "Servo Motor", "robotics", 1890),
        item("item-14", "Robot Arm Kit", "robotics", 32900),
        item("item-15", "Lidar Sensor", "robotics", 18900),
        item("item-16", "Wheel Encoder", "robotics", 1290),
        item("item-17", "Bench Power Supply", "power", 15900),
        item("item-18", "LiPo Battery Pack", "power", 4490),
        item("item-19", "USB Power Meter", "power", 2290),
        item("item-20", "Buck Converter", "power", 890),
        item("item-21", "Resistor Assortment", "components", 1190),
        item("item-22", "Capacitor Kit", "components", 1390),
        item("item-23", "Breadboard", "components", 790),
        item("item-24", "Jumper Wire Set", "components", 690),
    ]
});

fn filter_items(category: Option<&str>) -> Vec<Item> {
    match category {
        None => CATALOGUE.clone(),
        Some(category) => CATALOGUE
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect(),
    }
}

// ============================================================================
// Handler
// ============================================================================

/// GET /v1/items
pub async fn list(
    Negotiate(format): Negotiate,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return Problem::bad_request(rejection.body_text())
                .with_format(format)
                .into_response();
        }
    };

    let page = match list_page(&params) {
        Ok(page) => page,
        Err(err) => return problem_for(format, err).into_response(),
    };

    let body = ListData {
        items: page.items,
        total: page.total,
    };
    let mut response = negotiated(format, StatusCode::OK, &body);
    if !page.link_header.is_empty() {
        if let Ok(value) = page.link_header.parse() {
            response.headers_mut().insert(header::LINK, value);
        }
    }
    response
}

fn list_page(params: &ListParams) -> Result<Page<Item>> {
    super::check_input(params)?;

    let limit = params
        .limit
        .map(|l| l as usize)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);

    let cursor = Cursor::decode(params.cursor.as_deref().unwrap_or(""))?;
    cursor.expect_kind(CURSOR_TYPE)?;

    let filtered = filter_items(params.category.as_deref());

    if !cursor.value.is_empty() && !filtered.iter().any(|item| item.id == cursor.value) {
        return Err(Error::unknown_cursor_item(&cursor.value));
    }

    let mut query: Vec<(String, String)> = Vec::new();
    if let Some(category) = &params.category {
        query.push(("category".to_string(), category.clone()));
    }

    Ok(paginate(
        &filtered,
        &cursor,
        limit,
        CURSOR_TYPE,
        |item| &item.id,
        "/v1/items",
        &query,
    ))
}
