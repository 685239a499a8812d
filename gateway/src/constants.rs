/// Header carrying the shared secret on every request.
pub const SECRET_HEADER: &str = "catalyst-codelib-secret-key";

/// Reserved identifier field of every stored document.
pub const ID_FIELD: &str = "_id";

/// Upper bound for bulk payloads, delete-by-ids lists and `perPage`.
pub const MAX_RECORDS_PER_OPERATION: usize = 200;

pub mod env {
    pub const MONGODB_CONNECTION_URL: &str = "MONGODB_CONNECTION_URL";
    pub const DATABASE_NAME: &str = "DATABASE_NAME";
    pub const COLLECTION_NAME: &str = "COLLECTION_NAME";
    pub const SECRET_KEY: &str = "CODELIB_SECRET_KEY";
    pub const SERVER_HOST: &str = "SERVER_HOST";
    pub const SERVER_PORT: &str = "SERVER_PORT";
    pub const CONNECT_TIMEOUT_MS: &str = "MONGODB_CONNECT_TIMEOUT_MS";
    pub const MAX_PAYLOAD_BYTES: &str = "MAX_PAYLOAD_BYTES";
}

pub mod messages {
    pub const UNAUTHORIZED: &str = "You don't have permission to perform this operation. Kindly contact your administrator for more details.";
    pub const DOCUMENT_NOT_FOUND: &str = "No such document with the given id exists.";
    pub const ROUTE_NOT_FOUND: &str = "We couldn't find the requested url.";
    pub const INTERNAL: &str = "Internal server error. Please try again after some time.";
    pub const INVALID_JSON: &str = "Invalid JSON payload.";
}
