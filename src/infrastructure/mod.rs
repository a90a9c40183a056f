//! External concerns: the on-disk audit log

pub mod audit;

pub use audit::AuditLog;
