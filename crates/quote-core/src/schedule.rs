//! 攤銷計劃模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AmortizationMode;

/// 攤銷計劃中的一年
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationScheduleEntry {
    /// 第幾年（從 1 起算）
    pub year: u32,

    /// 對應的日曆年（有 SOP 日期時）
    pub calendar_year: Option<i32>,

    /// 當年產量
    pub units_produced: u64,

    /// 當年攤銷額
    pub yearly_amortization: Decimal,

    /// 累計攤銷額
    pub cumulative_amortization: Decimal,

    /// 剩餘未攤銷額，單調不增，最後一年為 0
    pub remaining_investment: Decimal,
}

/// 單一投資項的攤銷結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAmortization {
    pub investment_id: Uuid,
    pub name: String,
    pub mode: AmortizationMode,

    /// 投資總額
    pub total_investment: Decimal,

    /// 攤銷基數（含資本利息）
    pub amortization_base: Decimal,

    /// 實際採用的攤銷年限
    pub amortization_years: u32,

    /// 年攤銷額
    pub annual_amortization: Decimal,

    /// 單件攤銷額
    pub per_unit_amortization: Decimal,

    /// 逐年計劃（一次性支付時為空）
    pub schedule: Vec<AmortizationScheduleEntry>,
}

impl InvestmentAmortization {
    /// 計劃中各年攤銷額之和
    pub fn total_scheduled(&self) -> Decimal {
        self.schedule.iter().map(|e| e.yearly_amortization).sum()
    }

    pub fn is_upfront(&self) -> bool {
        self.mode == AmortizationMode::Upfront
    }
}
