//! 投資回收財務指標模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::IrrMethod;
use crate::{QuoteError, Result};

/// 可能無法達成的指標值
///
/// 年利潤 ≤ 0 時回收期與 ROI 沒有意義，以 `Unreachable` 表示，
/// 與一個很大的數值區分開來。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecoveryValue {
    Value(Decimal),
    Unreachable,
}

impl RecoveryValue {
    pub fn value(&self) -> Option<Decimal> {
        match *self {
            Self::Value(v) => Some(v),
            Self::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

/// 低於此年限視為快速回收
pub const FAST_PAYBACK_YEARS: u32 = 3;

/// 低於此年限視為合理回收
pub const REASONABLE_PAYBACK_YEARS: u32 = 5;

/// NPV 評估
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpvVerdict {
    /// 正向價值，建議投資
    Positive,
    /// 負向或零價值，需調整價格或投資
    NonPositive,
}

/// IRR 相對資本成本的評估
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrVerdict {
    AboveCostOfCapital,
    /// 不高於資本成本
    NearCostOfCapital,
    /// IRR 無解，無法評估
    Undetermined,
}

/// 回收期評估
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaybackVerdict {
    /// < 3 年
    Fast,
    /// 3 ~ 5 年
    Reasonable,
    /// ≥ 5 年
    Long,
    Unreachable,
}

/// 投資表現評估
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentVerdict {
    pub npv: NpvVerdict,
    pub irr: IrrVerdict,
    pub payback: PaybackVerdict,
}

impl InvestmentVerdict {
    /// 依 NPV、IRR 與回收期分級
    ///
    /// `cost_of_capital_percent` 為 IRR 的比較基準（通常即折現率 × 100）。
    pub fn assess(
        npv: Decimal,
        irr_percent: Option<Decimal>,
        cost_of_capital_percent: Decimal,
        payback: RecoveryValue,
    ) -> Self {
        let npv = if npv > Decimal::ZERO {
            NpvVerdict::Positive
        } else {
            NpvVerdict::NonPositive
        };

        let irr = match irr_percent {
            Some(irr) if irr > cost_of_capital_percent => IrrVerdict::AboveCostOfCapital,
            Some(_) => IrrVerdict::NearCostOfCapital,
            None => IrrVerdict::Undetermined,
        };

        let payback = match payback {
            RecoveryValue::Value(years) if years < Decimal::from(FAST_PAYBACK_YEARS) => {
                PaybackVerdict::Fast
            }
            RecoveryValue::Value(years) if years < Decimal::from(REASONABLE_PAYBACK_YEARS) => {
                PaybackVerdict::Reasonable
            }
            RecoveryValue::Value(_) => PaybackVerdict::Long,
            RecoveryValue::Unreachable => PaybackVerdict::Unreachable,
        };

        Self { npv, irr, payback }
    }

    /// 是否建議投資（NPV 為正）
    pub fn is_recommended(&self) -> bool {
        self.npv == NpvVerdict::Positive
    }
}

/// 逐年現金流
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub year: u32,
    /// 淨現金流 = 年利潤 × 現金流比例
    pub net_cash_flow: Decimal,
    /// 折現後現金流
    pub discounted_cash_flow: Decimal,
    /// 累計淨現金流（未扣投資）
    pub cumulative_cash_flow: Decimal,
    /// 累計折現現金流（未扣投資）
    pub cumulative_discounted: Decimal,
}

/// 投資回收財務指標（衍生）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub total_investment: Decimal,
    pub annual_profit: Decimal,
    pub net_cash_flow: Decimal,
    pub discount_rate: Decimal,
    pub recovery_fraction: Decimal,
    pub horizon_years: u32,

    /// 淨現值
    pub npv: Decimal,

    /// 內部收益率（%），區間內無解時為 None
    pub irr_percent: Option<Decimal>,

    /// IRR 採用的計算方式
    pub irr_method: IrrMethod,

    /// 簡單回收期（年，不折現）
    pub payback_period_years: RecoveryValue,

    /// 投資回報率（%）
    pub roi_percent: RecoveryValue,

    /// 折現回收年：累計折現現金流首次覆蓋投資的年份
    pub discounted_payback_year: Option<u32>,

    /// 投資表現評估
    pub verdict: InvestmentVerdict,

    pub cash_flows: Vec<CashFlowEntry>,
}

impl FinancialMetrics {
    /// 回收期；無法回收時回傳錯誤
    pub fn payback_years(&self) -> Result<Decimal> {
        self.payback_period_years
            .value()
            .ok_or(QuoteError::UnreachablePayback {
                annual_profit: self.annual_profit,
            })
    }

    /// ROI；無法回收時回傳錯誤
    pub fn roi(&self) -> Result<Decimal> {
        self.roi_percent.value().ok_or(QuoteError::UnreachablePayback {
            annual_profit: self.annual_profit,
        })
    }

    /// NPV 是否為正
    pub fn is_value_creating(&self) -> bool {
        self.npv > Decimal::ZERO
    }
}
