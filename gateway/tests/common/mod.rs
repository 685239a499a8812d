#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web};
use gateway::auth::SecretValidator;
use gateway::constants::SECRET_HEADER;
use gateway::db::{DocumentStore, MemoryStore};
use serde_json::Value;

pub const SECRET: &str = "test-secret";
pub const COLLECTION: &str = "documents";

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(COLLECTION))
}

pub fn store_data(store: Arc<MemoryStore>) -> web::Data<dyn DocumentStore> {
    let store: Arc<dyn DocumentStore> = store;
    web::Data::from(store)
}

pub fn validator() -> web::Data<SecretValidator> {
    web::Data::new(SecretValidator::new(SECRET))
}

/// Builds the gateway app around the given store, wired like `main`.
macro_rules! init_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(common::store_data($store))
                .app_data(common::validator())
                .configure(gateway::handlers::configure)
                .default_service(actix_web::web::to(gateway::handlers::route_not_found)),
        )
        .await
    };
}

pub fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header((SECRET_HEADER, SECRET))
}

pub fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((SECRET_HEADER, SECRET))
        .set_json(body)
}

pub fn put(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(uri)
        .insert_header((SECRET_HEADER, SECRET))
        .set_json(body)
}

pub fn delete(uri: &str) -> test::TestRequest {
    test::TestRequest::delete()
        .uri(uri)
        .insert_header((SECRET_HEADER, SECRET))
}

pub fn records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| serde_json::json!({ "name": format!("doc-{}", i), "index": i }))
            .collect(),
    )
}
