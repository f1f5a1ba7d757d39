//! 產品模型

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{QuoteError, Result};

/// 報價產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: Uuid,

    /// 產品名稱
    pub name: String,

    /// 零件號
    pub part_number: String,

    /// 年產量（件/年）
    pub annual_volume: u64,

    /// 訂單數量
    pub order_quantity: u64,

    /// 量產開始日期（SOP）
    pub sop_date: Option<NaiveDate>,
}

impl Product {
    /// 創建新的產品
    pub fn new(name: impl Into<String>, part_number: impl Into<String>, annual_volume: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            part_number: part_number.into(),
            annual_volume,
            order_quantity: 0,
            sop_date: None,
        }
    }

    /// 建構器模式：設置訂單數量
    pub fn with_order_quantity(mut self, quantity: u64) -> Self {
        self.order_quantity = quantity;
        self
    }

    /// 建構器模式：設置 SOP 日期
    pub fn with_sop_date(mut self, date: NaiveDate) -> Self {
        self.sop_date = Some(date);
        self
    }

    /// 修訂年產量（成本定案前允許）
    pub fn revise_annual_volume(&mut self, annual_volume: u64) {
        self.annual_volume = annual_volume;
    }

    /// 年產量（Decimal），為 0 時回傳配置錯誤
    pub fn annual_volume_checked(&self) -> Result<Decimal> {
        if self.annual_volume == 0 {
            return Err(QuoteError::config("annual_volume", "必須大於 0"));
        }
        Ok(Decimal::from(self.annual_volume))
    }

    /// 訂單數量（Decimal）
    pub fn order_quantity_decimal(&self) -> Decimal {
        Decimal::from(self.order_quantity)
    }

    /// 量產首年（由 SOP 日期推得）
    pub fn start_year(&self) -> Option<i32> {
        self.sop_date.map(|date| date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = Product::new("Engine Block", "EB-2024-001", 100_000)
            .with_order_quantity(1_000)
            .with_sop_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

        assert_eq!(product.name, "Engine Block");
        assert_eq!(product.annual_volume_checked().unwrap(), Decimal::from(100_000));
        assert_eq!(product.order_quantity_decimal(), Decimal::from(1_000));
        assert_eq!(product.start_year(), Some(2026));
    }

    #[test]
    fn test_zero_volume_rejected() {
        let product = Product::new("Bracket", "BR-01", 0);

        assert_eq!(
            product.annual_volume_checked(),
            Err(QuoteError::config("annual_volume", "必須大於 0"))
        );
    }

    #[test]
    fn test_revise_volume_keeps_identity() {
        let mut product = Product::new("Bracket", "BR-01", 5_000);
        let id = product.id;

        product.revise_annual_volume(8_000);

        assert_eq!(product.id, id);
        assert_eq!(product.annual_volume, 8_000);
    }
}
