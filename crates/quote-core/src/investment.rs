//! 投資項（NRE）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{QuoteError, Result};

/// 投資類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentCategory {
    /// 模具
    Mold,
    /// 工裝
    Tooling,
    /// 檢具
    Gauge,
    /// 夾具
    Jig,
    /// 設備
    Equipment,
    /// 試驗
    Test,
    /// 其他
    Other,
}

/// 投資項，隸屬於單一產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentItem {
    /// 投資項ID
    pub id: Uuid,

    /// 名稱
    pub name: String,

    /// 類別
    pub category: InvestmentCategory,

    /// 投資總額
    pub total_investment: Decimal,

    /// 攤銷年限（≥ 1）
    pub amortization_years: u32,
}

impl InvestmentItem {
    /// 創建新的投資項
    pub fn new(
        name: impl Into<String>,
        category: InvestmentCategory,
        total_investment: Decimal,
        amortization_years: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            total_investment,
            amortization_years,
        }
    }

    /// 以指定年限取代自身年限（年限選擇器）
    pub fn with_amortization_years(mut self, years: u32) -> Self {
        self.amortization_years = years;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_investment < Decimal::ZERO {
            return Err(QuoteError::config("total_investment", "不可為負"));
        }
        if self.amortization_years == 0 {
            return Err(QuoteError::config("amortization_years", "必須至少為 1"));
        }
        Ok(())
    }
}
