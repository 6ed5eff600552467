//! Ticket printing
//!
//! - [`TicketRenderer`] lays out customer and kitchen tickets
//! - [`PrintJobDispatcher`] sends them through a certified [`PrintAgent`] session
//! - [`sequence_in_shift`] numbers orders within a shift

mod agent;
mod dispatcher;
mod renderer;
mod sequence;
mod types;

pub use agent::{AgentError, AgentSession, NetworkPrintAgent, PrintAgent};
pub use dispatcher::{DispatchError, DispatchResult, DocumentOutcome, JobState, PrintJobDispatcher};
pub use renderer::{TicketRenderer, format_money, format_timestamp};
pub use sequence::sequence_in_shift;
pub use types::{TicketSpec, TicketVariant};
