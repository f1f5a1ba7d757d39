//! 多年度 Business Case 模型
//!
//! 完全成本 SK = HK III + 模具回收 + 研發回收 + 管銷費用 + 營運資金利息。
//! 模具回收已含資本利息，營運資金利息只反映銷售帳期的資金占用。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{QuoteError, Result};

/// Business Case 參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessCaseParams {
    /// 首年基準單價
    pub base_price: Decimal,
    /// 管銷費用率（佔淨銷售額）
    #[serde(default = "default_sa_rate")]
    pub sa_rate: Decimal,
    /// 營運資金年利率
    #[serde(default = "default_working_capital_rate")]
    pub working_capital_rate: Decimal,
    /// 付款帳期（天，按 360 天計年）
    #[serde(default = "default_payment_terms_days")]
    pub payment_terms_days: u32,
}

fn default_sa_rate() -> Decimal {
    Decimal::new(21, 3)
}

fn default_working_capital_rate() -> Decimal {
    Decimal::new(5, 2)
}

fn default_payment_terms_days() -> u32 {
    90
}

impl BusinessCaseParams {
    pub fn new(base_price: Decimal) -> Self {
        Self {
            base_price,
            sa_rate: default_sa_rate(),
            working_capital_rate: default_working_capital_rate(),
            payment_terms_days: default_payment_terms_days(),
        }
    }

    pub fn with_sa_rate(mut self, rate: Decimal) -> Self {
        self.sa_rate = rate;
        self
    }

    pub fn with_working_capital_rate(mut self, rate: Decimal) -> Self {
        self.working_capital_rate = rate;
        self
    }

    pub fn with_payment_terms_days(mut self, days: u32) -> Self {
        self.payment_terms_days = days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_price <= Decimal::ZERO {
            return Err(QuoteError::config("base_price", "必須大於 0"));
        }
        if self.sa_rate < Decimal::ZERO || self.sa_rate > Decimal::ONE {
            return Err(QuoteError::config("sa_rate", "必須介於 0 與 1 之間"));
        }
        if self.working_capital_rate < Decimal::ZERO || self.working_capital_rate > Decimal::ONE {
            return Err(QuoteError::config("working_capital_rate", "必須介於 0 與 1 之間"));
        }
        Ok(())
    }
}

/// 單一年度輸入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialYear {
    /// 日曆年
    pub year: i32,
    pub volume: u64,
    /// 當年相對前一年淨單價的降價比例
    #[serde(default)]
    pub reduction_rate: Decimal,
    /// 指定淨單價；None 時由前一年淨單價與降價比例推得
    #[serde(default)]
    pub net_price: Option<Decimal>,
    /// 製造成本 HK III（年度總額）
    pub hk_3_cost: Decimal,
    /// 模具回收（含資本利息）
    #[serde(default)]
    pub recovery_tooling: Decimal,
    /// 研發回收
    #[serde(default)]
    pub recovery_rnd: Decimal,
}

impl FinancialYear {
    pub fn new(year: i32, volume: u64, hk_3_cost: Decimal) -> Self {
        Self {
            year,
            volume,
            reduction_rate: Decimal::ZERO,
            net_price: None,
            hk_3_cost,
            recovery_tooling: Decimal::ZERO,
            recovery_rnd: Decimal::ZERO,
        }
    }

    pub fn with_reduction_rate(mut self, rate: Decimal) -> Self {
        self.reduction_rate = rate;
        self
    }

    pub fn with_net_price(mut self, price: Decimal) -> Self {
        self.net_price = Some(price);
        self
    }

    pub fn with_recovery_tooling(mut self, amount: Decimal) -> Self {
        self.recovery_tooling = amount;
        self
    }

    pub fn with_recovery_rnd(mut self, amount: Decimal) -> Self {
        self.recovery_rnd = amount;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.reduction_rate < Decimal::ZERO || self.reduction_rate >= Decimal::ONE {
            return Err(QuoteError::config("reduction_rate", "必須介於 0（含）與 1 之間"));
        }
        if matches!(self.net_price, Some(price) if price < Decimal::ZERO) {
            return Err(QuoteError::config("net_price", "不可為負"));
        }
        for (field, value) in [
            ("hk_3_cost", self.hk_3_cost),
            ("recovery_tooling", self.recovery_tooling),
            ("recovery_rnd", self.recovery_rnd),
        ] {
            if value < Decimal::ZERO {
                return Err(QuoteError::config(field, "不可為負"));
            }
        }
        Ok(())
    }
}

/// 單一年度計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialYearResult {
    pub year: i32,
    pub volume: u64,
    pub net_price: Decimal,
    /// 以基準單價計的銷售額
    pub gross_sales: Decimal,
    /// 淨銷售額 = 淨單價 × 銷量
    pub net_sales: Decimal,
    pub hk_3_cost: Decimal,
    pub recovery_tooling: Decimal,
    pub recovery_rnd: Decimal,
    /// 管銷費用 S&A
    pub overhead_sa: Decimal,
    pub working_capital_interest: Decimal,
    /// 完全成本 SK
    pub sk_cost: Decimal,
    /// 邊際貢獻 I = 淨銷售額 - HK III
    pub db_1: Decimal,
    /// 淨利潤 IV = 淨銷售額 - SK
    pub db_4: Decimal,
}

impl FinancialYearResult {
    /// DB IV 非負即視為損益平衡
    pub fn breaks_even(&self) -> bool {
        self.db_4 >= Decimal::ZERO
    }
}

/// 多年度 Business Case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCase {
    pub params: BusinessCaseParams,
    pub years: Vec<FinancialYearResult>,
    /// 生命週期總銷量
    pub total_lifetime_volume: u64,
    /// 生命週期 DB IV 合計
    pub total_db_4: Decimal,
    /// 首個 DB IV ≥ 0 的年份
    pub break_even_year: Option<i32>,
}

impl BusinessCase {
    /// 生命週期是否整體獲利
    pub fn is_profitable(&self) -> bool {
        self.total_db_4 > Decimal::ZERO
    }
}
