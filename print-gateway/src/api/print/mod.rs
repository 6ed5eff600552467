//! Print API Module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /print/certificate | GET | public certificate for the print agent |
//! | /print/sign | POST | sign an agent challenge |
//! | /print/tickets | POST | print the tickets of a committed order |
//! | /print/tickets/preview | POST | render tickets without printing |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/print", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/certificate", get(handler::certificate))
        .route("/sign", post(handler::sign))
        .route("/tickets", post(handler::print_tickets))
        .route("/tickets/preview", post(handler::preview_tickets))
}
