//! Paging and filter types for list queries.

use serde::{Deserialize, Serialize};

/// One page of a paged query result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagedResult<T> {
    /// Records in this page, in stable key order.
    pub items: Vec<T>,
    /// 1-based page index this result corresponds to.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total records matching the filter across all pages.
    pub total: u64,
}

impl<T> PagedResult<T> {
    /// Whether pages beyond this one exist.
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }
}

/// Filter for patient list queries. The default matches every patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientFilter {
    /// Keep only patients whose `activo` flag is set.
    pub active_only: bool,
    /// Exact, case-sensitive match against `tipo_sangre`.
    pub tipo_sangre: Option<String>,
}

impl PatientFilter {
    /// Filter matching active patients only.
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    /// Filter matching one blood-type token exactly.
    pub fn blood_type(tipo: &str) -> Self {
        Self {
            tipo_sangre: Some(tipo.to_string()),
            ..Self::default()
        }
    }
}
