//! 成本項目正規化
//!
//! 把物料、工藝、投資、其他費用等異質紀錄轉成統一的 `LineItem`。

use quote_core::{
    CostItemKind, InvestmentItem, LineItem, MaterialRecord, OtherCostRecord, ProcessRecord,
    QuoteError, Result,
};
use rust_decimal::Decimal;

/// 成本項目正規化器
pub struct CostItemNormalizer;

impl CostItemNormalizer {
    /// 物料紀錄 → Material 明細行
    pub fn from_material(record: &MaterialRecord) -> Result<LineItem> {
        let mut item = LineItem::new(&record.item_code, CostItemKind::Material, record.quantity)
            .with_name(&record.name)
            .with_category(record.category.as_deref().unwrap_or("material"));
        item.unit = record.unit.clone();
        item.unit_price = record.std_price;
        item.vave_unit_price = record.vave_price;

        item.validate()?;
        Ok(item)
    }

    /// 工藝紀錄 → Process 明細行
    ///
    /// 用量 = 循環時間，單價 = 小時費率。沒有費率的工藝視為未定價。
    pub fn from_process(record: &ProcessRecord) -> Result<LineItem> {
        let mut item =
            LineItem::new(&record.process_code, CostItemKind::Process, record.cycle_time)
                .with_name(&record.name)
                .with_unit("h")
                .with_category(record.work_center.as_deref().unwrap_or("process"));

        if let Some(rate) = &record.rate {
            if rate.efficiency_factor < Decimal::ZERO {
                return Err(QuoteError::invalid_item(
                    &record.process_code,
                    "efficiency_factor 不可為負",
                ));
            }
            item.unit_price = Some(rate.std_hourly_rate());
            item.vave_unit_price = Some(rate.vave_hourly_rate());
        }

        item.validate()?;
        Ok(item)
    }

    /// 投資項 → Investment 明細行（數量 1，單價 = 投資總額）
    pub fn from_investment(investment: &InvestmentItem) -> Result<LineItem> {
        investment.validate()?;

        Ok(
            LineItem::new(investment.id.to_string(), CostItemKind::Investment, Decimal::ONE)
                .with_name(&investment.name)
                .with_unit_price(investment.total_investment)
                .with_category(format!("{:?}", investment.category).to_lowercase()),
        )
    }

    /// 其他費用 → Other 明細行（數量 1）
    pub fn from_other(record: &OtherCostRecord) -> Result<LineItem> {
        let item = LineItem::new(&record.id, CostItemKind::Other, Decimal::ONE)
            .with_name(&record.description)
            .with_unit_price(record.amount)
            .with_category("other");

        item.validate()?;
        Ok(item)
    }

    /// 批次正規化直接成本紀錄，保持輸入順序
    pub fn normalize(
        materials: &[MaterialRecord],
        processes: &[ProcessRecord],
        others: &[OtherCostRecord],
    ) -> Result<Vec<LineItem>> {
        let mut items = Vec::with_capacity(materials.len() + processes.len() + others.len());

        for record in materials {
            items.push(Self::from_material(record)?);
        }
        for record in processes {
            items.push(Self::from_process(record)?);
        }
        for record in others {
            items.push(Self::from_other(record)?);
        }

        tracing::debug!(
            "正規化完成：物料 {} 筆，工藝 {} 筆，其他 {} 筆",
            materials.len(),
            processes.len(),
            others.len()
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::{InvestmentCategory, ProcessRate};

    #[test]
    fn test_material_record() {
        let record = MaterialRecord::new("AL-6061", "鋁錠", Decimal::new(45, 1))
            .with_std_price(Decimal::from(19))
            .with_vave_price(Decimal::from(17))
            .with_unit("kg");

        let item = CostItemNormalizer::from_material(&record).unwrap();

        assert_eq!(item.kind, CostItemKind::Material);
        assert_eq!(item.id, "AL-6061");
        assert_eq!(item.unit.as_deref(), Some("kg"));
        assert_eq!(item.extended_cost(), Ok(Some(Decimal::new(855, 1))));
        assert_eq!(item.vave_extended_cost(), Ok(Some(Decimal::new(765, 1))));
    }

    #[test]
    fn test_unpriced_material_stays_unpriced() {
        let record = MaterialRecord::new("BOLT-M8", "螺栓", Decimal::from(12));
        let item = CostItemNormalizer::from_material(&record).unwrap();
        assert!(!item.is_priced());
    }

    #[test]
    fn test_process_record_uses_hourly_rate() {
        let record = ProcessRecord::new("OP-10", "CNC 加工", Decimal::new(15, 1)).with_rate(
            ProcessRate::new(Decimal::from(300), Decimal::from(50))
                .with_efficiency_factor(Decimal::new(8, 1)),
        );

        let item = CostItemNormalizer::from_process(&record).unwrap();

        assert_eq!(item.kind, CostItemKind::Process);
        assert_eq!(item.unit_price, Some(Decimal::from(350)));
        // 1.5 h × 350 = 525；VAVE = 1.5 × 350 × 0.8 = 420
        assert_eq!(item.extended_cost(), Ok(Some(Decimal::from(525))));
        assert_eq!(item.vave_extended_cost(), Ok(Some(Decimal::from(420))));
    }

    #[test]
    fn test_process_without_rate_is_unpriced() {
        let record = ProcessRecord::new("OP-20", "熱處理", Decimal::ONE);
        let item = CostItemNormalizer::from_process(&record).unwrap();
        assert!(!item.is_priced());
    }

    #[test]
    fn test_investment_line() {
        let mold = InvestmentItem::new("缸體模具", InvestmentCategory::Mold, Decimal::from(15_000), 5);
        let item = CostItemNormalizer::from_investment(&mold).unwrap();

        assert_eq!(item.kind, CostItemKind::Investment);
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.unit_price, Some(Decimal::from(15_000)));
        assert_eq!(item.category, "mold");
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let record = MaterialRecord::new("AL-6061", "鋁錠", Decimal::from(-2));
        assert!(matches!(
            CostItemNormalizer::from_material(&record),
            Err(QuoteError::InvalidLineItem { .. })
        ));
    }

    #[test]
    fn test_normalize_keeps_order() {
        let items = CostItemNormalizer::normalize(
            &[MaterialRecord::new("M-1", "m", Decimal::ONE)],
            &[ProcessRecord::new("P-1", "p", Decimal::ONE)],
            &[OtherCostRecord::new("O-1", "包裝", Decimal::new(250, 2))],
        )
        .unwrap();

        let kinds: Vec<_> = items.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![CostItemKind::Material, CostItemKind::Process, CostItemKind::Other]
        );
    }
}
