pub mod admin;
pub mod client;
pub mod notifications;
pub mod trainer;
