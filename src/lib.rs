//! # Quote
//!
//! 製造業報價成本引擎
//!
//! - [`model`]：資料模型、配置與錯誤類型
//! - [`calc`]：BOM 彙總、攤銷、間接費用、QS 成本、定價與投資回收
//! - [`cache`]：專案工作階段與髒標記重算

pub use quote_cache as cache;
pub use quote_calc as calc;
pub use quote_core as model;

pub use quote_cache::ProjectQuoteSession;
pub use quote_calc::{compute_quote, QuoteCalculator, QuoteInput, QuoteParameters, QuoteResult};
pub use quote_core::{IndirectCostSet, QuoteConfig, QuoteError, Result};
