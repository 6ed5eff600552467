//! Print API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pos_printer::PrintDocument;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{OrderSnapshot, TenantProfile};

use crate::api::convert::{certificate_error, signing_error};
use crate::core::ServerState;
use crate::printing::{DispatchResult, TicketSpec, TicketVariant, sequence_in_shift};

#[derive(Debug, Deserialize)]
pub struct SignRequest {
    #[serde(rename = "toSign", default)]
    pub to_sign: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintTicketsRequest {
    pub tenant: TenantProfile,
    pub order: OrderSnapshot,
    /// Ids of every order in the owning shift
    #[serde(default)]
    pub shift_order_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPreview {
    pub variant: TicketVariant,
    pub sequence_in_shift: u32,
    pub document: PrintDocument,
}

/// Serve the public certificate as plain text
pub async fn certificate(State(state): State<ServerState>) -> AppResult<String> {
    let certificate = state
        .certificates
        .get_certificate()
        .await
        .map_err(certificate_error)?;
    Ok(certificate.as_str().to_string())
}

/// Sign an agent challenge, returning the base64 signature as plain text
///
/// An unreadable body is treated like a missing `toSign`.
pub async fn sign(
    State(state): State<ServerState>,
    payload: Result<Json<SignRequest>, JsonRejection>,
) -> AppResult<String> {
    let to_sign = match payload {
        Ok(Json(req)) => req.to_sign.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable sign request");
            String::new()
        }
    };

    let response = state
        .signer
        .sign(to_sign.as_bytes())
        .await
        .map_err(signing_error)?;
    Ok(response.signature)
}

/// Print the tickets of a committed order
///
/// Printing is best-effort: any valid request answers 200 with the
/// dispatch result, whether or not the tickets came out.
pub async fn print_tickets(
    State(state): State<ServerState>,
    payload: Result<Json<PrintTicketsRequest>, JsonRejection>,
) -> AppResult<Json<DispatchResult>> {
    let Json(req) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let sequence = sequence_in_shift(&req.shift_order_ids, req.order.id);

    let result = state
        .dispatcher
        .dispatch(&req.order, &req.tenant, sequence)
        .await;
    Ok(Json(result))
}

/// Render the tickets of an order without printing
pub async fn preview_tickets(
    State(state): State<ServerState>,
    payload: Result<Json<PrintTicketsRequest>, JsonRejection>,
) -> AppResult<Json<Vec<TicketPreview>>> {
    let Json(req) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let sequence = sequence_in_shift(&req.shift_order_ids, req.order.id);
    let renderer = state.dispatcher.renderer();

    let previews = TicketSpec::variants_for(&req.tenant)
        .iter()
        .map(|&variant| TicketPreview {
            variant,
            sequence_in_shift: sequence,
            document: renderer.build(&TicketSpec::new(&req.tenant, &req.order, variant, sequence)),
        })
        .collect();
    Ok(Json(previews))
}
