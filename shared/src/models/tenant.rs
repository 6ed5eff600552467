//! Tenant Profile Model

use serde::{Deserialize, Serialize};

/// How many tickets an order produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketMode {
    /// Customer ticket only
    #[default]
    Normal,
    /// Customer ticket + kitchen ticket
    Double,
}

/// Tenant settings used on printed tickets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfile {
    pub display_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub footer_message: String,
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
    #[serde(default)]
    pub ticket_mode: TicketMode,
}

fn default_currency() -> String {
    "DH".to_string()
}

impl TenantProfile {
    pub fn prints_kitchen_ticket(&self) -> bool {
        self.ticket_mode == TicketMode::Double
    }
}
