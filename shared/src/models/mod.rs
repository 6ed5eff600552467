//! Domain models
//!
//! Read-only snapshots handed over by the POS backend once an order is
//! committed. The gateway never mutates or persists them.

pub mod order;
pub mod tenant;

pub use order::{OrderLine, OrderSnapshot};
pub use tenant::{TenantProfile, TicketMode};
