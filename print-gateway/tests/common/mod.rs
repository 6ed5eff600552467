#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pos_printer::PrintDocument;
use pos_trust::{Certificate, SecureSigner};
use print_gateway::printing::{AgentError, AgentSession, PrintAgent};
use rust_decimal::Decimal;
use shared::models::{OrderLine, OrderSnapshot, TenantProfile, TicketMode};

pub const CHALLENGE: &[u8] = b"agent-nonce:7f3a9c:1729260000000";

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../pos-trust/tests/fixtures")
        .join(name)
}

/// In-memory agent with scripted behavior
///
/// Submissions are numbered from 0 across every session it hands out.
#[derive(Default)]
pub struct ScriptedAgent {
    pub unreachable: bool,
    /// Sign and verify a challenge during the handshake
    pub challenge: bool,
    pub reject_submissions: Vec<usize>,
    pub connects: AtomicUsize,
    pub received: Arc<Mutex<Vec<(String, PrintDocument)>>>,
    attempts: Arc<AtomicUsize>,
}

impl ScriptedAgent {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(indices: &[usize]) -> Self {
        Self {
            reject_submissions: indices.to_vec(),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn challenging() -> Self {
        Self {
            challenge: true,
            ..Self::default()
        }
    }

    pub fn received(&self) -> Vec<(String, PrintDocument)> {
        self.received.lock().unwrap().clone()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrintAgent for ScriptedAgent {
    async fn connect(
        &self,
        certificate: &Certificate,
        signer: Arc<dyn SecureSigner>,
    ) -> Result<Box<dyn AgentSession>, AgentError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(AgentError::Unreachable("scripted agent offline".into()));
        }

        if self.challenge {
            let response = signer
                .sign_challenge(CHALLENGE)
                .await
                .map_err(|e| AgentError::HandshakeRejected(e.to_string()))?;
            let signature = STANDARD
                .decode(response.signature)
                .map_err(|e| AgentError::HandshakeRejected(e.to_string()))?;
            pos_trust::verify(certificate.as_str(), CHALLENGE, &signature)
                .map_err(|e| AgentError::HandshakeRejected(e.to_string()))?;
        }

        Ok(Box::new(ScriptedSession {
            reject_submissions: self.reject_submissions.clone(),
            attempts: Arc::clone(&self.attempts),
            received: Arc::clone(&self.received),
        }))
    }
}

struct ScriptedSession {
    reject_submissions: Vec<usize>,
    attempts: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<(String, PrintDocument)>>>,
}

#[async_trait]
impl AgentSession for ScriptedSession {
    async fn submit(&mut self, printer: &str, document: PrintDocument) -> Result<(), AgentError> {
        let index = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.reject_submissions.contains(&index) {
            return Err(AgentError::SubmissionRejected(format!("paper out (job {index})")));
        }
        self.received
            .lock()
            .unwrap()
            .push((printer.to_string(), document));
        Ok(())
    }
}

pub fn tenant(mode: TicketMode) -> TenantProfile {
    TenantProfile {
        display_name: "Café Atlas".to_string(),
        address: "12 Rue Tarik, Casablanca".to_string(),
        phone: "0522 00 00 00".to_string(),
        footer_message: "Merci de votre visite".to_string(),
        currency_symbol: "DH".to_string(),
        ticket_mode: mode,
    }
}

pub fn order() -> OrderSnapshot {
    OrderSnapshot {
        id: 1003,
        lines: vec![
            OrderLine {
                name: "Café Noir".to_string(),
                quantity: 2,
                unit_price: Decimal::new(12, 0),
                line_total: Decimal::new(24, 0),
            },
            OrderLine {
                name: "Croissant".to_string(),
                quantity: 1,
                unit_price: Decimal::new(15, 0),
                line_total: Decimal::new(15, 0),
            },
        ],
        total: Decimal::new(39, 0),
        payment_method: None,
        operator_name: "Amina".to_string(),
        created_at: 1729260000000,
    }
}
