//! Print Gateway - secure print-command channel for the POS
//!
//! # Architecture
//!
//! ```text
//! print-gateway/src/
//! ├── core/        # config, state, server
//! ├── api/         # HTTP routes and handlers
//! ├── printing/    # ticket layout, agent seam, dispatcher
//! └── utils/       # logging
//! ```
//!
//! The gateway serves the public certificate and signs challenges for the
//! print agent, and turns committed orders into customer and kitchen tickets.

pub mod api;
pub mod core;
pub mod printing;
pub mod utils;

pub use crate::core::{Config, Server, ServerError, ServerState};
pub use crate::printing::{
    DispatchResult, NetworkPrintAgent, PrintAgent, PrintJobDispatcher, TicketRenderer,
};

/// Load `.env`, read the configuration and initialize logging from it
pub fn setup_environment() -> Config {
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    let log_path = config.log_path();
    utils::logger::init_logger_with_file(Some(&config.log_level), log_path.to_str());
    config
}

pub fn print_banner() {
    println!(
        r#"
   ____           _       ____       _       _
  / ___|_ __ __ _| |__   |  _ \ _ __(_)_ __ | |_
 | |   | '__/ _` | '_ \  | |_) | '__| | '_ \| __|
 | |___| | | (_| | |_) | |  __/| |  | | | | | |_
  \____|_|  \__,_|_.__/  |_|   |_|  |_|_| |_|\__|
    "#
    );
    println!("  Print Gateway v{}", env!("CARGO_PKG_VERSION"));
    println!();
}
