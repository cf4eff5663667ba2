//! Shared query parameter types for API handlers.

use helios_db::models::history::SortOrder;
use serde::Deserialize;

/// Query parameters for ledger read endpoints (`?order=asc|desc`).
///
/// Used by every history listing. Defaults to newest-first when omitted.
#[derive(Debug, Deserialize)]
pub struct SortParams {
    #[serde(default)]
    pub order: SortOrder,
}
