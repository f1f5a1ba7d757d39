//! # Quote Core
//!
//! 報價成本引擎的核心資料模型與類型定義

pub mod breakdown;
pub mod business_case;
pub mod config;
pub mod indirect;
pub mod investment;
pub mod line_item;
pub mod metrics;
pub mod money;
pub mod pricing;
pub mod product;
pub mod records;
pub mod schedule;

// Re-export 主要類型
pub use breakdown::CostBreakdown;
pub use business_case::{BusinessCase, BusinessCaseParams, FinancialYear, FinancialYearResult};
pub use config::{AmortizationMode, AmortizationStrategy, IrrMethod, QuoteConfig};
pub use indirect::IndirectCostSet;
pub use investment::{InvestmentCategory, InvestmentItem};
pub use line_item::{CostItemKind, LineItem};
pub use metrics::{
    CashFlowEntry, FinancialMetrics, InvestmentVerdict, IrrVerdict, NpvVerdict, PaybackVerdict,
    RecoveryValue, FAST_PAYBACK_YEARS, REASONABLE_PAYBACK_YEARS,
};
pub use money::{round_display, try_add, try_div, try_mul, try_sub, try_sum, PricePair};
pub use pricing::{PricingInput, PricingMode, PricingScenario, PricingStrategy};
pub use product::Product;
pub use records::{MaterialRecord, OtherCostRecord, ProcessRate, ProcessRecord};
pub use schedule::{AmortizationScheduleEntry, InvestmentAmortization};

use rust_decimal::Decimal;

/// 報價計算錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    /// 參數不合法，於任何除法之前拒絕
    #[error("配置錯誤: {field} {reason}")]
    Configuration { field: &'static str, reason: String },

    #[error("無效的成本項目 {item_id}: {reason}")]
    InvalidLineItem { item_id: String, reason: String },

    /// 有項目缺少單價，成本可算但不完整
    #[error("資料不完整: {count} 筆項目缺少單價 {items:?}")]
    IncompleteData { count: usize, items: Vec<String> },

    #[error("無法計算利潤率: 單位成本為 0")]
    UndefinedMargin,

    #[error("投資無法回收: 年利潤 {annual_profit} 不大於 0")]
    UnreachablePayback { annual_profit: Decimal },

    #[error("IRR 求解失敗: 折現率區間 [{lower}, {upper}] 內 NPV 無變號")]
    IrrNotBracketed { lower: f64, upper: f64 },

    #[error("IRR 求解未收斂: {iterations} 次迭代後 NPV 仍為 {residual}")]
    IrrNotConverged { iterations: u32, residual: f64 },

    #[error("數值溢位: {0}")]
    Overflow(String),
}

impl QuoteError {
    /// 建立配置錯誤
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }

    /// 建立成本項目錯誤
    pub fn invalid_item(item_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLineItem {
            item_id: item_id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_names_field() {
        let err = QuoteError::config("annual_volume", "必須大於 0");
        assert_eq!(err.to_string(), "配置錯誤: annual_volume 必須大於 0");
    }

    #[test]
    fn test_incomplete_data_lists_items() {
        let err = QuoteError::IncompleteData {
            count: 2,
            items: vec!["MAT-01".to_string(), "OP-20".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("2 筆"));
        assert!(message.contains("MAT-01"));
    }
}
