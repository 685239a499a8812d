pub mod pagination;
pub mod payload;

pub use pagination::{PageMeta, Pagination};
pub use payload::{
    parse_bulk_payload, parse_ids, validate_bulk, validate_update_identifiers, JsonObject,
};
