mod audit_log;
mod client;
mod notification;
mod trainer;
mod training;
mod user;

pub use audit_log::{AuditAction, AuditLogEntry};
pub use client::Client;
pub use notification::Notification;
pub use trainer::Trainer;
pub use training::{
    ClientInvoice, InvoiceStatus, LifecycleEvent, NewTrainingRequest, PoDocument, PoStatus,
    TrainerInvoice, TrainerInvoiceStatus, Training, TrainingStatus,
};
pub use user::{Role, User};
