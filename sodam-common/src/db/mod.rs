//! Database schema and persisted row models

pub mod init;
pub mod models;

pub use init::init_database;
pub use models::{ConsultationRecord, RiskAnalysisRecord};
