//! 成本拆解模型（衍生，不儲存）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round_display;

/// 單件成本拆解
///
/// 每次輸入變動都整份重建，不做原地局部更新。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// 直接成本 = 物料 + 工藝 + 其他
    pub direct_cost: Decimal,
    pub material_cost: Decimal,
    pub process_cost: Decimal,
    pub other_cost: Decimal,

    /// 間接費用（專案共用）
    pub indirect_cost: Decimal,

    /// NRE 單件攤銷
    pub amortized_cost: Decimal,

    /// QS 成本 = 直接 + 間接 + 攤銷
    pub total_unit_cost: Decimal,

    /// VAVE 口徑的 QS 成本
    pub vave_total_unit_cost: Decimal,

    /// 一次性支付（不進單價）的投資總額
    pub upfront_investment: Decimal,

    /// BOM 是否全數定價
    pub is_complete: bool,

    /// 未定價項目數
    pub unpriced_count: usize,
}

impl CostBreakdown {
    /// 顯示用：所有金額捨入到 2 位小數
    pub fn rounded(&self) -> Self {
        Self {
            direct_cost: round_display(self.direct_cost),
            material_cost: round_display(self.material_cost),
            process_cost: round_display(self.process_cost),
            other_cost: round_display(self.other_cost),
            indirect_cost: round_display(self.indirect_cost),
            amortized_cost: round_display(self.amortized_cost),
            total_unit_cost: round_display(self.total_unit_cost),
            vave_total_unit_cost: round_display(self.vave_total_unit_cost),
            upfront_investment: round_display(self.upfront_investment),
            ..self.clone()
        }
    }

    /// 攤銷佔 QS 成本比例
    pub fn amortized_share(&self) -> Decimal {
        if self.total_unit_cost.is_zero() {
            Decimal::ZERO
        } else {
            self.amortized_cost / self.total_unit_cost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostBreakdown {
        CostBreakdown {
            direct_cost: Decimal::new(82050, 2),
            material_cost: Decimal::new(8550, 2),
            process_cost: Decimal::new(73500, 2),
            other_cost: Decimal::ZERO,
            indirect_cost: Decimal::new(82850, 2),
            amortized_cost: Decimal::new(96, 3),
            total_unit_cost: Decimal::new(1649096, 3),
            vave_total_unit_cost: Decimal::new(1649096, 3),
            upfront_investment: Decimal::ZERO,
            is_complete: true,
            unpriced_count: 0,
        }
    }

    #[test]
    fn test_rounded_only_touches_amounts() {
        let rounded = sample().rounded();

        assert_eq!(rounded.amortized_cost, Decimal::new(10, 2));
        assert_eq!(rounded.total_unit_cost, Decimal::new(164910, 2));
        assert!(rounded.is_complete);
    }

    #[test]
    fn test_amortized_share() {
        let mut breakdown = sample();
        breakdown.total_unit_cost = Decimal::ZERO;
        assert_eq!(breakdown.amortized_share(), Decimal::ZERO);
    }
}
