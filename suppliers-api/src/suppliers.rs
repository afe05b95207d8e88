use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use suppliers_core::{Supplier, SupplierQuery};
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;

const JSON_MEDIA_TYPE: &str = "application/json";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route("/suppliers/{id}/disable", put(disable_supplier))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /suppliers
/// Lists suppliers, optionally filtered by name, category, availability and status
pub async fn list_suppliers(
    State(state): State<AppState>,
    query: Result<Query<SupplierQuery>, QueryRejection>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    info!("Request for supplier list {:?}", query);

    let suppliers = state
        .supplier_repo
        .search(&query.normalized())
        .await
        .map_err(AppError::storage)?;

    info!("Returning {} suppliers", suppliers.len());
    Ok(Json(suppliers))
}

/// GET /suppliers/{id}
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Supplier>, AppError> {
    info!("Request for supplier with id: {}", raw_id);
    let id = parse_id(&raw_id)?;

    let supplier = state
        .supplier_repo
        .find(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::supplier_not_found(id))?;

    info!("Returning supplier: {}", supplier.name);
    Ok(Json(supplier))
}

/// POST /suppliers
/// Creates a supplier from the posted body; the response carries a Location header
pub async fn create_supplier(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    info!("Request to create a supplier");
    check_content_type(&headers)?;

    let supplier = Supplier::from_json(&parse_body(&body)?)?;
    let created = state
        .supplier_repo
        .create(&supplier)
        .await
        .map_err(AppError::storage)?;

    let id = created
        .id
        .ok_or_else(|| AppError::InternalServerError("store returned a supplier without an id".to_string()))?;
    let location = location_url(&headers, id);

    info!("Supplier with ID [{}] created.", id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// PUT /suppliers/{id}
/// Replaces name, category and availability; status only when the body names one
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Supplier>, AppError> {
    info!("Request to update supplier with id: {}", raw_id);
    check_content_type(&headers)?;
    let id = parse_id(&raw_id)?;

    let existing = state
        .supplier_repo
        .find(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::supplier_not_found(id))?;

    let data = parse_body(&body)?;
    let mut supplier = Supplier::from_json(&data)?.with_id(id);
    // A body without a status leaves the stored one alone
    if data.get("status").map_or(true, Value::is_null) {
        supplier.status = existing.status;
    }
    let updated = state
        .supplier_repo
        .update(&supplier)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::supplier_not_found(id))?;

    info!("Supplier with ID [{}] updated.", id);
    Ok(Json(updated))
}

/// PUT /suppliers/{id}/disable
pub async fn disable_supplier(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Supplier>, AppError> {
    info!("Request to disable supplier with id: {}", raw_id);
    let id = parse_id(&raw_id)?;

    let mut supplier = state
        .supplier_repo
        .find(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::supplier_not_found(id))?;

    supplier.disable();
    let updated = state
        .supplier_repo
        .update(&supplier)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::supplier_not_found(id))?;

    info!("Supplier with ID [{}] disabled.", id);
    Ok(Json(updated))
}

/// DELETE /suppliers/{id}
/// Always answers 204, whether or not the supplier existed
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    info!("Request to delete supplier with id: {}", raw_id);
    let id = parse_id(&raw_id)?;

    state
        .supplier_repo
        .delete(id)
        .await
        .map_err(AppError::storage)?;

    info!("Supplier with ID [{}] delete complete.", id);
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Utility functions
// ============================================================================

/// Ids are integers; anything else names no supplier.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        AppError::NotFound(format!("Supplier with id '{}' was not found.", raw))
    })
}

fn check_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let media_type = content_type.map(|ct| ct.split(';').next().unwrap_or_default().trim());
    if media_type.is_some_and(|mt| mt.eq_ignore_ascii_case(JSON_MEDIA_TYPE)) {
        return Ok(());
    }

    error!("Invalid Content-Type: {:?}", content_type);
    Err(AppError::UnsupportedMediaType(format!(
        "Content-Type must be {}",
        JSON_MEDIA_TYPE
    )))
}

fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        AppError::BadRequest(format!(
            "Invalid supplier: body of request contained bad or no data {}",
            e
        ))
    })
}

fn location_url(headers: &HeaderMap, id: i64) -> String {
    let path = format!("/suppliers/{}", id);
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path,
    }
}
