//! # Quote Cache
//!
//! 專案級報價工作階段：共用間接費用、髒標記與整份重算

pub mod dirty_tracking;
pub mod project;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use project::ProjectQuoteSession;
