//! Catalog CRUD handlers: clients, products and copywriter profiles.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mailcraft_core::catalog::{CatalogError, Client, Copywriter, Product};
use serde_json::Value;

use crate::api::{json_body, AppState};
use crate::error::ApiError;

type Created<T> = (StatusCode, Json<T>);

fn found<T>(record: Option<T>, kind: &'static str, id: u64) -> Result<Json<T>, ApiError> {
    record
        .map(Json)
        .ok_or_else(|| ApiError::from(CatalogError::NotFound { kind, id }))
}

// ── Clients ──

pub async fn list_clients(State(app): State<AppState>) -> Json<Vec<Client>> {
    Json(app.catalog.list_clients())
}

pub async fn get_client(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Client>, ApiError> {
    found(app.catalog.get_client(id), "client", id)
}

pub async fn create_client(
    State(app): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Created<Client>, ApiError> {
    let client = app.catalog.create_client(json_body(payload)?)?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(app.catalog.update_client(id, json_body(payload)?)?))
}

pub async fn delete_client(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    app.catalog.delete_client(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn client_products(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Json<Vec<Product>> {
    Json(app.catalog.products_by_client(id))
}

// ── Products ──

pub async fn list_products(State(app): State<AppState>) -> Json<Vec<Product>> {
    Json(app.catalog.list_products())
}

pub async fn get_product(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    found(app.catalog.get_product(id), "product", id)
}

pub async fn create_product(
    State(app): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Created<Product>, ApiError> {
    let product = app.catalog.create_product(json_body(payload)?)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(app.catalog.update_product(id, json_body(payload)?)?))
}

pub async fn delete_product(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    app.catalog.delete_product(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Copywriters ──

pub async fn list_copywriters(State(app): State<AppState>) -> Json<Vec<Copywriter>> {
    Json(app.catalog.list_copywriters())
}

pub async fn active_copywriters(State(app): State<AppState>) -> Json<Vec<Copywriter>> {
    Json(app.catalog.active_copywriters())
}

pub async fn get_copywriter(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Copywriter>, ApiError> {
    found(app.catalog.get_copywriter(id), "copywriter", id)
}

pub async fn create_copywriter(
    State(app): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Created<Copywriter>, ApiError> {
    let copywriter = app.catalog.create_copywriter(json_body(payload)?)?;
    Ok((StatusCode::CREATED, Json(copywriter)))
}

pub async fn update_copywriter(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Copywriter>, ApiError> {
    Ok(Json(app.catalog.update_copywriter(id, json_body(payload)?)?))
}

pub async fn delete_copywriter(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    app.catalog.delete_copywriter(id)?;
    Ok(StatusCode::NO_CONTENT)
}
