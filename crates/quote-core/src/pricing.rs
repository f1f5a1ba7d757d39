//! 定價情境模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 定價模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingMode {
    /// 輸入單價，推算利潤率
    PriceGiven,
    /// 輸入利潤率，推算單價
    MarginGiven,
}

/// 使用者輸入的定價驅動值，每次只有一個
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PricingInput {
    /// 單價
    UnitPrice(Decimal),
    /// 利潤率（%，以成本為基準）
    MarginPercent(Decimal),
}

impl PricingInput {
    pub fn mode(&self) -> PricingMode {
        match self {
            Self::UnitPrice(_) => PricingMode::PriceGiven,
            Self::MarginPercent(_) => PricingMode::MarginGiven,
        }
    }

    pub fn value(&self) -> Decimal {
        match *self {
            Self::UnitPrice(v) | Self::MarginPercent(v) => v,
        }
    }
}

impl From<PricingStrategy> for PricingInput {
    fn from(strategy: PricingStrategy) -> Self {
        Self::MarginPercent(strategy.margin_percent())
    }
}

/// 預設報價策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingStrategy {
    /// 保守策略：較低利潤率，高中標機率
    Conservative,
    /// 平衡策略
    Balanced,
    /// 激進策略：高利潤率，中標風險較高
    Aggressive,
}

impl PricingStrategy {
    pub const ALL: [PricingStrategy; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    pub fn margin_percent(&self) -> Decimal {
        match self {
            Self::Conservative => Decimal::from(15),
            Self::Balanced => Decimal::from(25),
            Self::Aggressive => Decimal::from(35),
        }
    }
}

/// 定價情境（衍生）
///
/// 驅動欄位由 `mode` 決定，另一欄位每次重新推算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingScenario {
    pub mode: PricingMode,

    /// 使用者輸入值（單價或利潤率）
    pub input_value: Decimal,

    /// QS 成本
    pub total_unit_cost: Decimal,

    pub unit_price: Decimal,

    /// 利潤率（%）
    pub margin_percent: Decimal,

    pub unit_profit: Decimal,

    /// 訂單營收 = 單價 × 訂單數量
    pub order_revenue: Decimal,

    /// 年營收 = 單價 × 年產量
    pub annual_revenue: Decimal,

    /// 年利潤 = 單件利潤 × 年產量
    pub annual_profit: Decimal,
}
