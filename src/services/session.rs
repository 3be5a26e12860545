//! Session identity
//!
//! The browser generates a token once, stores it under
//! [`SESSION_STORAGE_KEY`], and sends it with every tracking call. Any
//! client-supplied token is trusted as-is; there is no server-side
//! validation or dedup beyond the stored row.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::api::admin::types::TS_EXPORT_PATH;

/// Local-storage key the frontend keeps the session token under
pub const SESSION_STORAGE_KEY: &str = "linkrotator_session";

pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Tablet => "Tablet",
            DeviceType::Desktop => "Desktop",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Substring classification: `mobile` wins over `tablet`, default Desktop
pub fn classify_device(user_agent: &str) -> DeviceType {
    let ua = user_agent.to_lowercase();
    if ua.contains("mobile") {
        DeviceType::Mobile
    } else if ua.contains("tablet") {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}
