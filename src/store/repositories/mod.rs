mod audit_log_repository;
mod client_repository;
mod notification_repository;
mod trainer_repository;
mod training_repository;
mod user_repository;

pub use audit_log_repository::AuditLogRepository;
pub use client_repository::ClientRepository;
pub use notification_repository::NotificationRepository;
pub use trainer_repository::TrainerRepository;
pub use training_repository::TrainingRepository;
pub use user_repository::UserRepository;
