use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, OffsetDateTime};
use validator::Validate;

/// Position of a training engagement in its delivery lifecycle.
///
/// The order is strictly forward; legality of a move lives in
/// [`TrainingStatus::apply`], the single transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingStatus {
    Requested,
    #[serde(rename = "Trainer Assigned")]
    TrainerAssigned,
    Active,
    Completed,
    #[serde(rename = "Invoice Generated")]
    InvoiceGenerated,
    #[serde(rename = "Payment Done")]
    PaymentDone,
}

/// Events that drive the lifecycle. `UploadTrainerInvoice` is status-neutral
/// and therefore has no entry in the transition table; `Payment Done` is
/// reached by an external collaborator and has no producing event here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    AssignTrainer,
    AcceptAssignment,
    MarkCompleted,
    UploadTrainerInvoice,
    GenerateClientInvoice,
}

impl TrainingStatus {
    /// Returns the successor status for `event`, or `None` when the event is
    /// not legal from the current status.
    pub fn apply(self, event: LifecycleEvent) -> Option<TrainingStatus> {
        use LifecycleEvent::*;
        use TrainingStatus::*;
        match (self, event) {
            (Requested, AssignTrainer) => Some(TrainerAssigned),
            (TrainerAssigned, AcceptAssignment) => Some(Active),
            (Active, MarkCompleted) => Some(Completed),
            (Completed, GenerateClientInvoice) => Some(InvoiceGenerated),
            _ => None,
        }
    }
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrainingStatus::Requested => "Requested",
            TrainingStatus::TrainerAssigned => "Trainer Assigned",
            TrainingStatus::Active => "Active",
            TrainingStatus::Completed => "Completed",
            TrainingStatus::InvoiceGenerated => "Invoice Generated",
            TrainingStatus::PaymentDone => "Payment Done",
        };
        f.write_str(label)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifecycleEvent::AssignTrainer => "AssignTrainer",
            LifecycleEvent::AcceptAssignment => "AcceptAssignment",
            LifecycleEvent::MarkCompleted => "MarkCompleted",
            LifecycleEvent::UploadTrainerInvoice => "UploadTrainerInvoice",
            LifecycleEvent::GenerateClientInvoice => "GenerateClientInvoice",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoStatus {
    Uploaded,
    Generated,
    Accepted,
}

/// Simulated purchase-order document attached to a training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoDocument {
    pub filename: String,
    pub status: PoStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Generated,
    Paid,
}

/// Client-facing invoice computed when a completed training is billed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInvoice {
    pub invoice_number: String,
    pub company_name: String,
    pub training_name: String,
    pub technology: String,
    pub duration: String,
    pub cost: f64,
    pub gst: f64,
    pub total_amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    pub po_reference: String,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainerInvoiceStatus {
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerInvoice {
    pub filename: String,
    pub status: TrainerInvoiceStatus,
}

/// A single training engagement moving through the lifecycle.
///
/// Invariants maintained by the lifecycle engine: `trainer_id` is null iff
/// status is `Requested`; `client_invoice` is non-null only from
/// `Invoice Generated` onwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: String,
    pub title: String,
    pub technology: String,
    pub client_id: String,
    pub trainer_id: Option<String>,
    pub budget: f64,
    #[serde(with = "calendar_date")]
    pub preferred_dates: Date,
    pub status: TrainingStatus,
    #[serde(rename = "clientPO")]
    pub client_po: Option<PoDocument>,
    #[serde(rename = "trainerPO")]
    pub trainer_po: Option<PoDocument>,
    pub client_invoice: Option<ClientInvoice>,
    pub trainer_invoice: Option<TrainerInvoice>,
}

/// Payload for a client raising a new training request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTrainingRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "technology is required"))]
    pub technology: String,
    #[serde(with = "calendar_date")]
    pub preferred_dates: Date,
    #[validate(range(exclusive_min = 0.0, message = "budget must be positive"))]
    pub budget: f64,
}

/// Serde adapter for plain `YYYY-MM-DD` calendar dates.
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::Date;

    const FORMAT: &'static [BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
