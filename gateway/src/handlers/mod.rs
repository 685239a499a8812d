pub mod documents;
pub mod fallback;

use actix_web::web;

pub use documents::{
    create_documents, delete_document, delete_documents, get_document, get_documents,
    update_documents,
};
pub use fallback::route_not_found;

/// Registers every document route. The unmatched-route fallback is installed
/// separately with `App::default_service` and runs the same gates.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_document)
        .service(get_documents)
        .service(create_documents)
        .service(update_documents)
        .service(delete_document)
        .service(delete_documents);
}
