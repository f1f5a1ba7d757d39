//! # Quote Calculation Engine
//!
//! 報價成本計算引擎：BOM 彙總、NRE 攤銷、間接費用分攤、QS 成本組合、
//! 定價、投資回收分析與多年度 Business Case。所有階段皆為純函數，相同輸入必得相同輸出。

pub mod aggregation;
pub mod amortization;
pub mod business_case;
pub mod calculator;
pub mod composer;
pub mod indirect;
pub mod normalizer;
pub mod pricing;
pub mod recovery;

// Re-export 主要類型
pub use aggregation::{BomAggregator, BomCostSummary};
pub use amortization::AmortizationScheduler;
pub use business_case::BusinessCaseAnalyzer;
pub use calculator::{compute_quote, QuoteCalculator, QuoteInput, QuoteParameters};
pub use composer::QuoteCostComposer;
pub use indirect::IndirectCostAllocator;
pub use normalizer::CostItemNormalizer;
pub use pricing::PricingCalculator;
pub use recovery::{solve_irr, RecoveryAnalyzer, RecoveryInput};

use std::fmt;

use quote_core::{CostBreakdown, FinancialMetrics, InvestmentAmortization, PricingScenario};
use serde::Serialize;
use uuid::Uuid;

/// 單一產品的報價計算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResult {
    /// 產品ID
    pub product_id: Uuid,

    /// BOM 直接成本彙總
    pub bom: BomCostSummary,

    /// 各投資項攤銷
    pub amortizations: Vec<InvestmentAmortization>,

    /// 成本拆解（QS 成本）
    pub breakdown: CostBreakdown,

    /// 定價情境
    pub pricing: PricingScenario,

    /// 投資回收指標；沒有需攤銷的投資時為 None
    pub financials: Option<FinancialMetrics>,

    /// 警告信息
    pub warnings: Vec<QuoteWarning>,
}

impl QuoteResult {
    /// 添加警告
    pub fn add_warning(&mut self, warning: QuoteWarning) {
        self.warnings.push(warning);
    }

    /// 是否有錯誤等級的警告
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Error)
    }

    /// 指定種類的警告
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &QuoteWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

/// 警告所指的對象
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum WarningSubject {
    /// 產品零件號
    Product(String),
    /// BOM 項目編號
    LineItem(String),
}

impl fmt::Display for WarningSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(part_number) => write!(f, "產品 {}", part_number),
            Self::LineItem(item_id) => write!(f, "項目 {}", item_id),
        }
    }
}

/// 警告種類，決定嚴重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// 單一項目缺少單價
    UnpricedItem,
    /// 產品 BOM 不完整
    IncompleteBom,
    /// 沒有需攤銷的投資
    NoRecoverableInvestment,
    /// 年利潤不大於 0
    UnrecoverableInvestment,
    /// IRR 無解或未收斂
    IrrUndetermined,
}

impl WarningKind {
    pub fn severity(self) -> WarningSeverity {
        match self {
            Self::NoRecoverableInvestment => WarningSeverity::Info,
            Self::UnpricedItem | Self::IncompleteBom | Self::IrrUndetermined => {
                WarningSeverity::Warning
            }
            Self::UnrecoverableInvestment => WarningSeverity::Error,
        }
    }
}

/// 報價警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteWarning {
    pub subject: WarningSubject,
    pub kind: WarningKind,
    pub severity: WarningSeverity,
    pub message: String,
}

impl QuoteWarning {
    pub fn new(subject: WarningSubject, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            subject,
            kind,
            severity: kind.severity(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
