#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use gateway::constants::{messages, SECRET_HEADER};
use gateway::db::MemoryStore;
use serde_json::{json, Value};

fn unauthenticated_requests() -> Vec<test::TestRequest> {
    vec![
        test::TestRequest::get().uri("/document/abc"),
        test::TestRequest::get().uri("/documents?page=1&perPage=10"),
        test::TestRequest::post()
            .uri("/documents")
            .set_json(json!([{ "a": 1 }])),
        test::TestRequest::put()
            .uri("/documents")
            .set_json(json!([{ "_id": "x", "a": 1 }])),
        test::TestRequest::delete().uri("/document/abc"),
        test::TestRequest::delete().uri("/documents?ids=a,b"),
    ]
}

#[actix_web::test]
async fn test_missing_secret_rejected_on_every_route() {
    let app = init_app!(common::memory_store());

    for req in unauthenticated_requests() {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "failure");
        assert_eq!(body["message"], messages::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn test_wrong_secret_rejected_on_every_route() {
    let app = init_app!(common::memory_store());

    for req in unauthenticated_requests() {
        let req = req.insert_header((SECRET_HEADER, "not-the-secret")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn test_secret_checked_before_store() {
    let store = common::memory_store();
    store.set_failing(true);
    let app = init_app!(store);

    // A broken store would answer 500; the secret gate must answer first.
    let req = test::TestRequest::get().uri("/document/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_missing_collection_rejected() {
    let store = Arc::new(MemoryStore::without_collection("people"));
    let app = init_app!(store);

    let req = common::get("/documents?page=1&perPage=10").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "failure");
    assert_eq!(body["message"], "Collection 'people' does not exist");
}

#[actix_web::test]
async fn test_missing_collection_checked_before_payload() {
    let store = Arc::new(MemoryStore::without_collection("people"));
    let app = init_app!(store);

    let req = common::post("/documents", json!({ "not": "an array" })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Collection 'people' does not exist");
}
