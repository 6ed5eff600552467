//! Print agent seam
//!
//! A [`PrintAgent`] is whatever sits between the gateway and the physical
//! printer. Connecting hands over the public certificate and a signer the
//! agent may challenge; the resulting [`AgentSession`] accepts documents
//! addressed to a logical printer name.

use std::sync::Arc;

use async_trait::async_trait;
use pos_printer::{NetworkPrinter, PrintDocument, PrintError, Printer};
use pos_trust::{Certificate, SecureSigner};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Print agent unreachable: {0}")]
    Unreachable(String),

    #[error("Handshake rejected: {0}")]
    HandshakeRejected(String),

    #[error("Unknown printer: {0}")]
    UnknownPrinter(String),

    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Connection factory for a print agent
#[async_trait]
pub trait PrintAgent: Send + Sync {
    /// Perform the trusted handshake
    async fn connect(
        &self,
        certificate: &Certificate,
        signer: Arc<dyn SecureSigner>,
    ) -> Result<Box<dyn AgentSession>, AgentError>;
}

/// An established, certified channel
#[async_trait]
pub trait AgentSession: Send {
    /// Submit one document to the named printer
    async fn submit(&mut self, printer: &str, document: PrintDocument) -> Result<(), AgentError>;
}

/// Agent that drives a single raw-TCP printer directly
///
/// The printer is known under a fixed logical name; documents addressed to
/// any other name are rejected.
///
/// Raw TCP printers have no challenge protocol. `connect` only checks that
/// the printer answers: the certificate is logged by fingerprint and the
/// signer is never called, so this agent provides no cryptographic handshake.
/// Deployments that need a certified channel plug in a [`PrintAgent`] that
/// challenges the signer.
pub struct NetworkPrintAgent {
    printer_name: String,
    printer: NetworkPrinter,
}

impl NetworkPrintAgent {
    pub fn new(printer_name: impl Into<String>, printer: NetworkPrinter) -> Self {
        Self {
            printer_name: printer_name.into(),
            printer,
        }
    }

    pub fn printer_name(&self) -> &str {
        &self.printer_name
    }
}

#[async_trait]
impl PrintAgent for NetworkPrintAgent {
    #[instrument(skip_all, fields(printer = %self.printer_name, addr = %self.printer.addr()))]
    async fn connect(
        &self,
        certificate: &Certificate,
        _signer: Arc<dyn SecureSigner>,
    ) -> Result<Box<dyn AgentSession>, AgentError> {
        // Raw TCP printers never challenge; the handshake is a reachability probe
        if !self.printer.is_online().await {
            return Err(AgentError::Unreachable(self.printer.addr().to_string()));
        }
        debug!(fingerprint = %certificate.fingerprint().unwrap_or_default(), "Agent connected");

        Ok(Box::new(NetworkSession {
            printer_name: self.printer_name.clone(),
            printer: self.printer.clone(),
        }))
    }
}

struct NetworkSession {
    printer_name: String,
    printer: NetworkPrinter,
}

#[async_trait]
impl AgentSession for NetworkSession {
    async fn submit(&mut self, printer: &str, document: PrintDocument) -> Result<(), AgentError> {
        if printer != self.printer_name {
            return Err(AgentError::UnknownPrinter(printer.to_string()));
        }
        let data = document.into_escpos();
        self.printer.print(&data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_printer::PrintOp;
    use pos_trust::{SignResponse, SignatureService};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    const CERT: &str = include_str!("../../../pos-trust/tests/fixtures/digital-certificate.txt");

    fn signer() -> Arc<dyn SecureSigner> {
        Arc::new(SignatureService::new("/nonexistent/key.pem"))
    }

    #[tokio::test]
    async fn test_network_agent_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // First accept is the reachability probe, second carries the job
        let server = tokio::spawn(async move {
            let (_probe, _) = listener.accept().await.unwrap();
            let (mut job, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            job.read_to_end(&mut buf).await.unwrap();
            buf
        });

        let agent = NetworkPrintAgent::new("POS-80", NetworkPrinter::from_addr(&addr.to_string()).unwrap());
        let certificate = Certificate::from_pem(CERT).unwrap();
        let mut session = agent.connect(&certificate, signer()).await.unwrap();

        let doc = PrintDocument::new(vec![PrintOp::WriteText("OK\n".into()), PrintOp::Cut]);
        session.submit("POS-80", doc.clone()).await.unwrap();
        drop(session);

        assert_eq!(server.await.unwrap(), doc.into_escpos());
    }

    #[tokio::test]
    async fn test_network_agent_unknown_printer() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _probe = listener.accept().await;
        });

        let agent = NetworkPrintAgent::new("POS-80", NetworkPrinter::from_addr(&addr.to_string()).unwrap());
        let certificate = Certificate::from_pem(CERT).unwrap();
        let mut session = agent.connect(&certificate, signer()).await.unwrap();

        let err = session
            .submit("BAR-58", PrintDocument::new(vec![PrintOp::Cut]))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::UnknownPrinter(name) if name == "BAR-58"));
    }

    #[tokio::test]
    async fn test_network_agent_never_signs() {
        struct CountingSigner(AtomicUsize);

        #[async_trait]
        impl SecureSigner for CountingSigner {
            async fn sign_challenge(&self, _payload: &[u8]) -> pos_trust::Result<SignResponse> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Err(pos_trust::TrustError::SigningFailed("not expected".into()))
            }

            fn algorithm(&self) -> &'static str {
                "RSA-SHA256"
            }
        }

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _probe = listener.accept().await;
        });

        let signer = Arc::new(CountingSigner(AtomicUsize::new(0)));
        let agent = NetworkPrintAgent::new("POS-80", NetworkPrinter::from_addr(&addr.to_string()).unwrap());
        let certificate = Certificate::from_pem(CERT).unwrap();
        agent.connect(&certificate, signer.clone()).await.unwrap();

        assert_eq!(signer.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_network_agent_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let agent = NetworkPrintAgent::new("POS-80", NetworkPrinter::from_addr(&addr.to_string()).unwrap());
        let certificate = Certificate::from_pem(CERT).unwrap();
        let result = agent.connect(&certificate, signer()).await;
        assert!(matches!(result, Err(AgentError::Unreachable(_))));
    }
}
