use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

pub const SKIP_PARAM: &str = "$skip";
pub const TOP_PARAM: &str = "$top";

/// Offset/limit window passed straight through to the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    /// Falls back to the client's `list_limit` when unset.
    pub limit: Option<u32>,
}

impl Page {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }

    pub fn offset(offset: u32) -> Self {
        Self {
            offset,
            limit: None,
        }
    }

    /// Resolves the effective page size against the client maximum.
    pub fn resolve_limit(&self, max: u32) -> Result<u32> {
        match self.limit {
            Some(0) => Err(ApiError::validation("page limit must be positive")),
            Some(limit) => Ok(limit.min(max)),
            None => Ok(max),
        }
    }

    pub(crate) fn query(&self, max: u32) -> Result<Vec<(String, String)>> {
        let top = self.resolve_limit(max)?;
        Ok(vec![
            (SKIP_PARAM.to_string(), self.offset.to_string()),
            (TOP_PARAM.to_string(), top.to_string()),
        ])
    }
}

/// List responses carry their rows under a top-level `data` field.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

impl DataEnvelope {
    pub fn into_data(self) -> Vec<Value> {
        self.data.unwrap_or_default()
    }
}
