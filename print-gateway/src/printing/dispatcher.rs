//! Print job dispatcher
//!
//! Sends the tickets of one committed order through a certified agent
//! session. Printing is best-effort: a failed ticket is reported, never
//! propagated, and never affects the order itself.

use std::sync::Arc;

use pos_trust::{CertificateStore, SecureSigner};
use serde::Serialize;
use shared::models::{OrderSnapshot, TenantProfile};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::agent::{AgentSession, PrintAgent};
use super::renderer::TicketRenderer;
use super::types::{TicketSpec, TicketVariant};

/// Reported dispatch failures
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchError {
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Print agent unreachable: {0}")]
    AgentUnreachable(String),

    #[error("{variant} ticket not printed: {message}")]
    DocumentSubmissionFailed {
        variant: TicketVariant,
        message: String,
    },
}

/// Dispatch progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Idle,
    Connecting,
    Certified,
    ConnectFailed,
    CustomerSent,
    CustomerFailed,
    KitchenSent,
    KitchenFailed,
    Done,
}

/// Result of submitting one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentOutcome {
    Sent,
    Failed { error: String },
}

impl DocumentOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Everything that happened during one dispatch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    /// Final state: DONE or CONNECT_FAILED
    pub state: JobState,
    pub trail: Vec<JobState>,
    /// Set when the trusted channel could not be established
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DispatchError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<DocumentOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen: Option<DocumentOutcome>,
    pub warnings: Vec<DispatchError>,
}

impl DispatchResult {
    fn new() -> Self {
        Self {
            state: JobState::Idle,
            trail: vec![JobState::Idle],
            error: None,
            customer: None,
            kitchen: None,
            warnings: Vec::new(),
        }
    }

    fn advance(&mut self, state: JobState) {
        self.state = state;
        self.trail.push(state);
    }

    fn record(&mut self, variant: TicketVariant, outcome: DocumentOutcome) {
        let state = match (variant, outcome.is_sent()) {
            (TicketVariant::Customer, true) => JobState::CustomerSent,
            (TicketVariant::Customer, false) => JobState::CustomerFailed,
            (TicketVariant::Kitchen, true) => JobState::KitchenSent,
            (TicketVariant::Kitchen, false) => JobState::KitchenFailed,
        };
        if let DocumentOutcome::Failed { error } = &outcome {
            self.warnings.push(DispatchError::DocumentSubmissionFailed {
                variant,
                message: error.clone(),
            });
        }
        match variant {
            TicketVariant::Customer => self.customer = Some(outcome),
            TicketVariant::Kitchen => self.kitchen = Some(outcome),
        }
        self.advance(state);
    }

    /// Whether the trusted channel was established
    pub fn is_connected(&self) -> bool {
        self.trail.contains(&JobState::Certified)
    }

    /// Number of documents handed to the agent
    pub fn submissions(&self) -> usize {
        self.customer.iter().chain(self.kitchen.iter()).count()
    }
}

/// Print job dispatcher
pub struct PrintJobDispatcher {
    agent: Arc<dyn PrintAgent>,
    certificates: Arc<CertificateStore>,
    signer: Arc<dyn SecureSigner>,
    renderer: TicketRenderer,
    printer_name: String,
}

impl PrintJobDispatcher {
    pub fn new(
        agent: Arc<dyn PrintAgent>,
        certificates: Arc<CertificateStore>,
        signer: Arc<dyn SecureSigner>,
        renderer: TicketRenderer,
        printer_name: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            certificates,
            signer,
            renderer,
            printer_name: printer_name.into(),
        }
    }

    pub fn renderer(&self) -> &TicketRenderer {
        &self.renderer
    }

    pub fn printer_name(&self) -> &str {
        &self.printer_name
    }

    /// Print the tickets of a committed order
    ///
    /// Never fails: connection problems end the job in CONNECT_FAILED, and
    /// document failures are collected as warnings.
    #[instrument(skip_all, fields(order_id = order.id, seq = sequence_in_shift))]
    pub async fn dispatch(
        &self,
        order: &OrderSnapshot,
        tenant: &TenantProfile,
        sequence_in_shift: u32,
    ) -> DispatchResult {
        let mut result = DispatchResult::new();

        result.advance(JobState::Connecting);
        let mut session = match self.connect().await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Print channel not established, nothing sent");
                result.error = Some(e);
                result.advance(JobState::ConnectFailed);
                return result;
            }
        };
        result.advance(JobState::Certified);

        for &variant in TicketSpec::variants_for(tenant) {
            let spec = TicketSpec::new(tenant, order, variant, sequence_in_shift);
            let outcome = self.submit(&mut session, &spec).await;
            result.record(variant, outcome);
        }

        result.advance(JobState::Done);
        info!(
            submissions = result.submissions(),
            warnings = result.warnings.len(),
            "Dispatch finished"
        );
        result
    }

    async fn connect(&self) -> Result<Box<dyn AgentSession>, DispatchError> {
        let certificate = self
            .certificates
            .get_certificate()
            .await
            .map_err(|e| DispatchError::ConfigurationMissing(e.to_string()))?;

        self.agent
            .connect(&certificate, Arc::clone(&self.signer))
            .await
            .map_err(|e| DispatchError::AgentUnreachable(e.to_string()))
    }

    async fn submit(
        &self,
        session: &mut Box<dyn AgentSession>,
        spec: &TicketSpec<'_>,
    ) -> DocumentOutcome {
        let document = self.renderer.build(spec);
        match session.submit(&self.printer_name, document).await {
            Ok(()) => {
                info!(variant = %spec.variant, printer = %self.printer_name, "Ticket sent");
                DocumentOutcome::Sent
            }
            Err(e) => {
                warn!(variant = %spec.variant, printer = %self.printer_name, error = %e, "Failed to print ticket");
                DocumentOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failure_adds_warning() {
        let mut result = DispatchResult::new();
        result.record(TicketVariant::Customer, DocumentOutcome::Sent);
        result.record(
            TicketVariant::Kitchen,
            DocumentOutcome::Failed {
                error: "paper out".into(),
            },
        );

        assert_eq!(
            result.trail,
            vec![JobState::Idle, JobState::CustomerSent, JobState::KitchenFailed]
        );
        assert_eq!(result.submissions(), 2);
        assert_eq!(
            result.warnings,
            vec![DispatchError::DocumentSubmissionFailed {
                variant: TicketVariant::Kitchen,
                message: "paper out".into(),
            }]
        );
    }

    #[test]
    fn test_result_serialization() {
        let mut result = DispatchResult::new();
        result.error = Some(DispatchError::AgentUnreachable("127.0.0.1:9100".into()));
        result.advance(JobState::ConnectFailed);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["state"], "CONNECT_FAILED");
        assert_eq!(json["trail"], serde_json::json!(["IDLE", "CONNECT_FAILED"]));
        assert_eq!(json["error"]["kind"], "AGENT_UNREACHABLE");
        assert!(json.get("customer").is_none());

        let outcome = serde_json::to_value(DocumentOutcome::Failed {
            error: "x".into(),
        })
        .unwrap();
        assert_eq!(outcome, serde_json::json!({"status": "FAILED", "error": "x"}));
    }
}
