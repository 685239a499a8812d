use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    bulk::{prepare_inserts, prepare_updates, to_json},
    constants::{messages, ID_FIELD},
    error::{GatewayError, Result},
    middleware::{read_json, BodyLimit, Gated},
    validation::{
        parse_bulk_payload, parse_ids, validate_bulk, validate_update_identifiers, PageMeta,
        Pagination,
    },
};

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub status: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct DocumentPage {
    pub data: Vec<Value>,
    pub page: PageMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    page: Option<String>,
    per_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    ids: Option<String>,
}

fn success<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(SuccessResponse {
        status: "success",
        data,
    })
}

fn query<T: serde::de::DeserializeOwned>(req: &HttpRequest) -> Result<T> {
    web::Query::<T>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| GatewayError::validation(format!("Invalid query string: {}", e)))
}

fn body_limit(req: &HttpRequest) -> BodyLimit {
    req.app_data::<web::Data<BodyLimit>>()
        .map(|limit| *limit.get_ref())
        .unwrap_or_default()
}

fn not_found() -> GatewayError {
    GatewayError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string())
}

#[get("/document/{document_id}")]
pub async fn get_document(gated: Gated, path: web::Path<String>) -> Result<HttpResponse> {
    let document_id = path.into_inner();

    let document = gated
        .store()
        .find_one(&document_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(success(to_json(document)))
}

#[get("/documents")]
pub async fn get_documents(gated: Gated, req: HttpRequest) -> Result<HttpResponse> {
    let params: ListQuery = query(&req)?;
    let pagination = Pagination::compute(params.page.as_deref(), params.per_page.as_deref())?;

    let store = gated.store();
    let total_records = store.count_documents().await?;
    let documents = store
        .find_page(pagination.offset(), pagination.per_page)
        .await?;

    log::debug!(
        "Listed {} documents (page {}, perPage {})",
        documents.len(),
        pagination.page,
        pagination.per_page
    );

    Ok(success(DocumentPage {
        data: documents.into_iter().map(to_json).collect(),
        page: pagination.meta(total_records),
    }))
}

#[post("/documents")]
pub async fn create_documents(
    gated: Gated,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let body = read_json(payload, body_limit(&req)).await?;
    let records = parse_bulk_payload(body, "create")?;
    let documents = prepare_inserts(records)?;

    gated.store().insert_many(&documents).await?;

    log::info!("Created {} documents", documents.len());

    let data: Vec<Value> = documents.into_iter().map(to_json).collect();
    Ok(success(data))
}

#[put("/documents")]
pub async fn update_documents(
    gated: Gated,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let body = read_json(payload, body_limit(&req)).await?;
    let records = parse_bulk_payload(body, "update")?;
    validate_update_identifiers(&records, ID_FIELD)?;
    let prepared = prepare_updates(records)?;

    let store = gated.store();
    store.update_fields(prepared.updates).await?;

    // Re-read after the batch: the result reflects the store's current
    // state, which may include concurrent writes.
    let documents = store.find_by_ids(&prepared.ids).await?;

    log::info!(
        "Updated {} documents ({} requested)",
        documents.len(),
        prepared.ids.len()
    );

    let data: Vec<Value> = documents.into_iter().map(to_json).collect();
    Ok(success(data))
}

#[delete("/document/{document_id}")]
pub async fn delete_document(gated: Gated, path: web::Path<String>) -> Result<HttpResponse> {
    let document_id = path.into_inner();
    let store = gated.store();

    let document = store.find_one(&document_id).await?.ok_or_else(not_found)?;
    store.delete_one(&document_id).await?;

    log::info!("Deleted document {}", document_id);

    Ok(success(to_json(document)))
}

#[delete("/documents")]
pub async fn delete_documents(gated: Gated, req: HttpRequest) -> Result<HttpResponse> {
    let params: DeleteQuery = query(&req)?;
    let ids = parse_ids(params.ids.as_deref());
    validate_bulk(&ids, "ids", "delete")?;

    let store = gated.store();
    // Identifiers that match nothing are left out of the response.
    let documents = store.find_by_ids(&ids).await?;
    store.delete_by_ids(&ids).await?;

    log::info!(
        "Deleted {} documents ({} requested)",
        documents.len(),
        ids.len()
    );

    let data: Vec<Value> = documents.into_iter().map(to_json).collect();
    Ok(success(data))
}
