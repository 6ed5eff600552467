use std::sync::Arc;

use pos_printer::NetworkPrinter;
use pos_trust::{CertificateStore, SecureSigner, SignatureService, TrustError};

use crate::core::{Config, Result, ServerError};
use crate::printing::{NetworkPrintAgent, PrintAgent, PrintJobDispatcher, TicketRenderer};

/// Shared server state
///
/// Cheap to clone; every service sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    /// Public certificate, loaded on first use
    pub certificates: Arc<CertificateStore>,
    /// Signing key, loaded on first use
    pub signer: Arc<SignatureService>,
    pub dispatcher: Arc<PrintJobDispatcher>,
}

impl ServerState {
    /// Wire the services against the configured network printer
    pub fn initialize(config: &Config) -> Result<Self> {
        let printer = NetworkPrinter::from_addr(&config.printer_addr)
            .map_err(|e| ServerError::Config(e.to_string()))?
            .with_timeout(config.printer_timeout());
        let agent = Arc::new(NetworkPrintAgent::new(config.printer_name.clone(), printer));

        Ok(Self::with_agent(config, agent))
    }

    /// Wire the services against any print agent
    pub fn with_agent(config: &Config, agent: Arc<dyn PrintAgent>) -> Self {
        let certificates = Arc::new(CertificateStore::new(&config.cert_path));
        let signer = Arc::new(SignatureService::new(&config.key_path));
        Self::from_parts(config, certificates, signer, agent)
    }

    pub fn from_parts(
        config: &Config,
        certificates: Arc<CertificateStore>,
        signer: Arc<SignatureService>,
        agent: Arc<dyn PrintAgent>,
    ) -> Self {
        let renderer = TicketRenderer::new(config.paper_width, config.timezone);
        let dispatcher = PrintJobDispatcher::new(
            agent,
            Arc::clone(&certificates),
            Arc::clone(&signer) as Arc<dyn SecureSigner>,
            renderer,
            config.printer_name.clone(),
        );

        Self {
            config: Arc::new(config.clone()),
            certificates,
            signer,
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Check that the signing key matches the certificate
    ///
    /// Never fatal: the gateway still serves the certificate when the key is
    /// missing, and the agent will reject bad signatures on its own.
    pub async fn verify_trust_material(&self) {
        match pos_trust::self_check(&self.certificates, &self.signer).await {
            Ok(()) => tracing::info!("Certificate and signing key verified"),
            Err(TrustError::ConfigurationMissing(msg)) => {
                tracing::warn!("Trust material incomplete: {}", msg)
            }
            Err(e) => tracing::warn!(error = %e, "Signing key does not match certificate"),
        }
    }
}
