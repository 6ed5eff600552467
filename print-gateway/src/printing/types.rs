//! Printing types

use serde::Serialize;
use shared::models::{OrderSnapshot, TenantProfile};

/// Which ticket to build for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketVariant {
    /// Receipt handed to the customer
    Customer,
    /// Preparation slip, only in DOUBLE ticket mode
    Kitchen,
}

impl TicketVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Kitchen => "KITCHEN",
        }
    }
}

impl std::fmt::Display for TicketVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to lay out one ticket
#[derive(Debug, Clone, Copy)]
pub struct TicketSpec<'a> {
    pub tenant: &'a TenantProfile,
    pub order: &'a OrderSnapshot,
    pub variant: TicketVariant,
    /// 1-based position of the order within its shift
    pub sequence_in_shift: u32,
}

impl<'a> TicketSpec<'a> {
    pub fn new(
        tenant: &'a TenantProfile,
        order: &'a OrderSnapshot,
        variant: TicketVariant,
        sequence_in_shift: u32,
    ) -> Self {
        Self {
            tenant,
            order,
            variant,
            sequence_in_shift,
        }
    }

    /// Variants an order produces under the tenant's ticket mode, in print order
    pub fn variants_for(tenant: &TenantProfile) -> &'static [TicketVariant] {
        if tenant.prints_kitchen_ticket() {
            &[TicketVariant::Customer, TicketVariant::Kitchen]
        } else {
            &[TicketVariant::Customer]
        }
    }
}
