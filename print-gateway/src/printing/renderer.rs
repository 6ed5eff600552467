//! Ticket renderer
//!
//! Lays out customer receipts and kitchen slips as [`PrintDocument`]s.
//! Rendering is pure: the same input always yields the same operations.

use chrono_tz::Tz;
use pos_printer::{
    DocumentBuilder, PrintDocument, pad_left, pad_right, sanitize_text, truncate_chars,
};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{OrderSnapshot, TenantProfile};

use super::types::{TicketSpec, TicketVariant};

/// Column widths of the customer line table
const NAME_COLUMN: usize = 25;
const QUANTITY_COLUMN: usize = 5;
const PRICE_COLUMN: usize = 10;

const CUSTOMER_NAME_MAX: usize = 22;
const KITCHEN_NAME_MAX: usize = 20;

const DEFAULT_PAYMENT_METHOD: &str = "Espèces";
const FINAL_FEED_LINES: u8 = 3;

/// Thermal ticket renderer
pub struct TicketRenderer {
    width: usize,
    timezone: Tz,
}

impl TicketRenderer {
    /// Create a renderer with specified paper width and timezone
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize, timezone: Tz) -> Self {
        Self { width, timezone }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Build the document for one ticket
    pub fn build(&self, spec: &TicketSpec<'_>) -> PrintDocument {
        let mut b = PrintDocument::builder(self.width);
        match spec.variant {
            TicketVariant::Customer => self.render_customer(&mut b, spec),
            TicketVariant::Kitchen => self.render_kitchen(&mut b, spec),
        }
        b.build()
    }

    /// Build every ticket the order produces: customer, then kitchen in DOUBLE mode
    pub fn render_order(
        &self,
        order: &OrderSnapshot,
        tenant: &TenantProfile,
        sequence_in_shift: u32,
    ) -> Vec<PrintDocument> {
        TicketSpec::variants_for(tenant)
            .iter()
            .map(|&variant| self.build(&TicketSpec::new(tenant, order, variant, sequence_in_shift)))
            .collect()
    }

    fn render_customer(&self, b: &mut DocumentBuilder, spec: &TicketSpec<'_>) {
        let tenant = spec.tenant;
        let order = spec.order;
        // Columns are measured on printable text only
        let currency = sanitize_text(&tenant.currency_symbol);

        // Header: tenant name (large, centered)
        b.center().bold().size(2, 2);
        b.line(&tenant.display_name.to_uppercase());
        b.reset_size().bold_off();

        b.left();
        if !tenant.address.trim().is_empty() {
            b.line(&tenant.address);
        }
        if !tenant.phone.trim().is_empty() {
            b.line(&tenant.phone);
        }
        b.line(&format_timestamp(order.created_at, self.timezone));
        b.divider();

        // Line table
        b.bold().line(&table_row("Article", "Qté", "Prix")).bold_off();
        for line in &order.lines {
            let name = truncate_chars(&sanitize_text(&line.name), CUSTOMER_NAME_MAX);
            let price = format!("{} {}", format_money(line.line_total), currency);
            b.line(&table_row(&name, &line.quantity.to_string(), &price));
        }
        b.divider();

        b.center().bold();
        b.line(&format!("TOTAL TTC : {} {}", format_money(order.total), currency));
        b.bold_off().left();
        b.divider();

        b.line(&format!("Ticket N° : {}", spec.sequence_in_shift));
        b.line(&format!("Paiement : {}", payment_label(order.payment_method.as_deref())));
        b.line(&format!("Serveur : {}", order.operator_name));
        b.divider();

        // Footer
        b.center();
        b.line(&tenant.footer_message.to_uppercase());
        b.left();
        b.feed(FINAL_FEED_LINES).cut();
    }

    fn render_kitchen(&self, b: &mut DocumentBuilder, spec: &TicketSpec<'_>) {
        let order = spec.order;

        b.left().bold();
        b.line(&format!("COMMANDE N° {}", spec.sequence_in_shift));
        b.bold_off();
        b.line(&format_timestamp(order.created_at, self.timezone));
        b.line(&format!("Serveur : {}", order.operator_name));

        b.divider();
        b.bold().line("PRODUIT / QTÉ").bold_off();
        b.divider();

        for line in &order.lines {
            b.size(2, 3).text(&truncate_chars(&sanitize_text(&line.name), KITCHEN_NAME_MAX));
            b.reset_size().text(" x ");
            b.size(2, 2).line(&line.quantity.to_string());
            b.reset_size();
            b.divider();
        }

        b.feed(FINAL_FEED_LINES).cut();
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(48, chrono_tz::Africa::Casablanca)
    }
}

fn table_row(name: &str, quantity: &str, price: &str) -> String {
    format!(
        "{}{}{}",
        pad_right(name, NAME_COLUMN),
        pad_left(quantity, QUANTITY_COLUMN),
        pad_left(price, PRICE_COLUMN)
    )
}

fn payment_label(method: Option<&str>) -> &str {
    match method.map(str::trim) {
        Some(m) if !m.is_empty() => m,
        _ => DEFAULT_PAYMENT_METHOD,
    }
}

/// Format an amount with exactly two decimals, rounding half away from zero
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Format unix timestamp (millis) as `dd/mm/YYYY HH:MM` in given timezone
pub fn format_timestamp(ts: i64, tz: Tz) -> String {
    if let Some(dt) = chrono::DateTime::from_timestamp_millis(ts) {
        dt.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string()
    } else {
        "Date inconnue".to_string()
    }
}
