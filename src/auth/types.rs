//! Types for API key validation

use serde::{Deserialize, Serialize};

/// Scope granting full admin access
pub const SCOPE_ADMIN: &str = "admin";

/// Scope granting inventory editing
pub const SCOPE_INVENTORY: &str = "inventory";

/// Request body of `/misc/get_api_key_scopes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyScopeRequest {
    pub api_key: String,
}

/// Response of `/misc/get_api_key_scopes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyScopes {
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ApiKeyScopes {
    /// Whether the key carries `scope`
    pub fn has(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Whether the key may edit the inventory
    pub fn can_edit_inventory(&self) -> bool {
        self.has(SCOPE_ADMIN) || self.has(SCOPE_INVENTORY)
    }
}

/// A key that the server accepted with inventory scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedKey {
    pub api_key: String,
    pub scopes: ApiKeyScopes,
}
