//! 金額工具：雙軌價格與顯示捨入

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{QuoteError, Result};

/// 顯示用小數位數
pub const DISPLAY_SCALE: u32 = 2;

/// 顯示邊界的捨入（2 位小數，四捨五入）
///
/// 只在呈現/匯出時使用，計算過程保留完整精度。
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(field: &str) -> QuoteError {
    QuoteError::Overflow(field.to_string())
}

/// 加法；溢位時回傳 `Overflow` 並標明欄位
pub fn try_add(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(field))
}

pub fn try_sub(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow(field))
}

pub fn try_mul(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(field))
}

/// 除法；呼叫端須先排除除數為 0
pub fn try_div(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| overflow(field))
}

/// 加總；任一步溢位即失敗
pub fn try_sum<I>(values: I, field: &str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| try_add(acc, v, field))
}

/// 雙軌價格（標準 / VAVE）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePair {
    /// 標準成本
    pub std: Decimal,
    /// VAVE 目標成本
    pub vave: Decimal,
    /// 節省金額 (std - vave)
    pub savings: Decimal,
    /// 節省率 (savings / std)，std 為 0 時為 0
    pub savings_rate: Decimal,
}

impl PricePair {
    pub fn new(std: Decimal, vave: Decimal) -> Self {
        let savings = std - vave;
        let savings_rate = if std > Decimal::ZERO {
            savings / std
        } else {
            Decimal::ZERO
        };
        Self {
            std,
            vave,
            savings,
            savings_rate,
        }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }
}

impl PricePair {
    /// 兩軌分別相加
    pub fn try_add(self, rhs: PricePair, field: &str) -> Result<PricePair> {
        Ok(PricePair::new(
            try_add(self.std, rhs.std, field)?,
            try_add(self.vave, rhs.vave, field)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(Decimal::new(1896_4604, 4)), Decimal::new(189646, 2));
        assert_eq!(round_display(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_display(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
    }

    #[test]
    fn test_price_pair_savings() {
        let pair = PricePair::new(Decimal::from(200), Decimal::from(150));

        assert_eq!(pair.savings, Decimal::from(50));
        assert_eq!(pair.savings_rate, Decimal::new(25, 2));
    }

    #[test]
    fn test_price_pair_zero_std() {
        let pair = PricePair::zero();
        assert_eq!(pair.savings_rate, Decimal::ZERO);
    }

    #[test]
    fn test_price_pair_add() {
        let total = PricePair::new(Decimal::from(100), Decimal::from(90))
            .try_add(PricePair::new(Decimal::from(100), Decimal::from(70)), "direct_cost")
            .unwrap();

        assert_eq!(total.std, Decimal::from(200));
        assert_eq!(total.vave, Decimal::from(160));
        assert_eq!(total.savings_rate, Decimal::new(2, 1));
    }

    #[test]
    fn test_checked_helpers_report_field() {
        assert_eq!(
            try_mul(Decimal::MAX, Decimal::from(2), "annual_revenue"),
            Err(QuoteError::Overflow("annual_revenue".to_string()))
        );
        assert_eq!(
            try_sum([Decimal::MAX, Decimal::ONE], "direct_cost"),
            Err(QuoteError::Overflow("direct_cost".to_string()))
        );
        assert_eq!(
            try_sum([Decimal::ONE, Decimal::TWO], "direct_cost"),
            Ok(Decimal::from(3))
        );
    }
}
