use rand::Rng;
use time::{Duration, OffsetDateTime};

use crate::store::models::{ClientInvoice, InvoiceStatus, Training};

pub const GST_RATE: f64 = 0.18;
pub const PAYMENT_TERMS_DAYS: i64 = 15;

/// Fixed duration placeholder carried on every invoice; delivery length is
/// not tracked per training.
const SIMULATED_DURATION: &str = "5 Days";

const PO_PENDING_REFERENCE: &str = "PO_PENDING";

/// Computes the client invoice for a completed training.
///
/// The invoice number is a uniform draw in [1000, 9999]; collisions with
/// previously issued numbers are possible and accepted, so the number must
/// not be treated as a unique key.
pub fn compute_client_invoice(
    training: &Training,
    company_name: String,
    issued_at: OffsetDateTime,
) -> ClientInvoice {
    let cost = training.budget;
    let gst = cost * GST_RATE;

    ClientInvoice {
        invoice_number: format!("INV-CL-{}", rand::thread_rng().gen_range(1000..=9999)),
        company_name,
        training_name: training.title.clone(),
        technology: training.technology.clone(),
        duration: SIMULATED_DURATION.to_string(),
        cost,
        gst,
        total_amount: cost + gst,
        due_date: issued_at + Duration::days(PAYMENT_TERMS_DAYS),
        po_reference: training
            .trainer_po
            .as_ref()
            .or(training.client_po.as_ref())
            .map(|po| po.filename.clone())
            .unwrap_or_else(|| PO_PENDING_REFERENCE.to_string()),
        status: InvoiceStatus::Generated,
    }
}
