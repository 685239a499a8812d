use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::MAX_RECORDS_PER_OPERATION;
use crate::error::{GatewayError, Result};

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("numeric pattern is valid"));

/// Validated `page`/`perPage` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

/// Page metadata returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub has_more: bool,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_records: u64,
}

fn greater_than_zero(name: &str) -> GatewayError {
    GatewayError::validation(format!(
        "Invalid value for {name}. {name} should be a greater than 0."
    ))
}

fn per_page_too_large() -> GatewayError {
    GatewayError::validation(format!(
        "Invalid value for perPage. perPage should be a less than or equal to {}",
        MAX_RECORDS_PER_OPERATION
    ))
}

impl Pagination {
    /// Parses the raw query values. Both must be present, digit-only
    /// strings; `perPage` is capped at [`MAX_RECORDS_PER_OPERATION`].
    pub fn compute(page: Option<&str>, per_page: Option<&str>) -> Result<Self> {
        let page = page
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| GatewayError::validation("page cannot be empty."))?;
        let per_page = per_page
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| GatewayError::validation("perPage cannot be empty."))?;

        if !NUMERIC.is_match(page) {
            return Err(GatewayError::validation(
                "Invalid value for page. page should be a positive number.",
            ));
        }
        if !NUMERIC.is_match(per_page) {
            return Err(GatewayError::validation(
                "Invalid value for perPage. perPage should be a positive number.",
            ));
        }

        // Digits only at this point, so a parse failure means overflow. An
        // oversized page still fails as not a positive number; an oversized
        // perPage is over the cap.
        let page: u64 = page.parse().map_err(|_| {
            GatewayError::validation("Invalid value for page. page should be a positive number.")
        })?;
        let per_page: u64 = per_page.parse().map_err(|_| per_page_too_large())?;

        if page == 0 {
            return Err(greater_than_zero("page"));
        }
        if per_page == 0 {
            return Err(greater_than_zero("perPage"));
        }
        if per_page > MAX_RECORDS_PER_OPERATION as u64 {
            return Err(per_page_too_large());
        }

        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn meta(&self, total_records: u64) -> PageMeta {
        let total_pages = total_records.div_ceil(self.per_page);
        PageMeta {
            page: self.page,
            has_more: self.page < total_pages,
            per_page: self.per_page,
            total_pages,
            total_records,
        }
    }
}
