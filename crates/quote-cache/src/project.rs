//! 專案報價工作階段
//!
//! 間接費用為專案共用；變更時所有產品都需重算。其餘寫入只影響單一產品。
//! 結果只會整份替換，髒產品不回傳舊結果。

use std::collections::BTreeMap;

use quote_calc::{QuoteCalculator, QuoteInput, QuoteParameters, QuoteResult};
use quote_core::{IndirectCostSet, QuoteConfig, QuoteError, Result};
use uuid::Uuid;

use crate::DirtyTracker;

#[derive(Debug, Clone)]
struct ProductEntry {
    input: QuoteInput,
    params: QuoteParameters,
}

/// 單次重算的結果摘要
#[derive(Debug, Default)]
pub struct RecalculationReport {
    /// 成功重算的產品
    pub recalculated: Vec<Uuid>,
    /// 重算失敗的產品（維持髒標記）
    pub failed: Vec<(Uuid, QuoteError)>,
}

impl RecalculationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 專案報價工作階段
#[derive(Debug)]
pub struct ProjectQuoteSession {
    calculator: QuoteCalculator,
    indirect: IndirectCostSet,
    products: BTreeMap<Uuid, ProductEntry>,
    results: BTreeMap<Uuid, QuoteResult>,
    tracker: DirtyTracker,
}

impl ProjectQuoteSession {
    pub fn new(config: QuoteConfig, indirect: IndirectCostSet) -> Result<Self> {
        config.validate()?;
        indirect.validate()?;

        Ok(Self {
            calculator: QuoteCalculator::new(config),
            indirect,
            products: BTreeMap::new(),
            results: BTreeMap::new(),
            tracker: DirtyTracker::new(),
        })
    }

    /// 專案共用的間接費用
    pub fn indirect_costs(&self) -> &IndirectCostSet {
        &self.indirect
    }

    /// 更新間接費用，所有產品標記為髒
    pub fn set_indirect_costs(&mut self, indirect: IndirectCostSet) -> Result<()> {
        indirect.validate()?;
        self.indirect = indirect;
        self.tracker.mark_all(self.products.keys().copied());
        tracing::debug!("間接費用已更新，{} 個產品待重算", self.products.len());
        Ok(())
    }

    /// 新增或取代產品輸入，回傳產品ID
    pub fn upsert_product(&mut self, input: QuoteInput, params: QuoteParameters) -> Uuid {
        let id = input.product.id;
        self.products.insert(id, ProductEntry { input, params });
        self.tracker.mark_dirty(id);
        id
    }

    /// 更新單一產品的可調參數（利潤率/單價、攤銷年限）
    pub fn set_parameters(&mut self, product_id: Uuid, params: QuoteParameters) -> Result<()> {
        let entry = self
            .products
            .get_mut(&product_id)
            .ok_or_else(|| QuoteError::config("product_id", format!("找不到產品 {}", product_id)))?;
        entry.params = params;
        self.tracker.mark_dirty(product_id);
        Ok(())
    }

    /// 移除產品及其結果
    pub fn remove_product(&mut self, product_id: &Uuid) -> Option<QuoteInput> {
        self.results.remove(product_id);
        self.tracker.clear_one(product_id);
        self.products.remove(product_id).map(|entry| entry.input)
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.products.keys().copied().collect()
    }

    pub fn is_dirty(&self, product_id: &Uuid) -> bool {
        self.tracker.is_dirty(product_id)
    }

    /// 獲取最新結果；產品為髒時回傳 None
    pub fn result(&self, product_id: &Uuid) -> Option<&QuoteResult> {
        if self.tracker.is_dirty(product_id) {
            return None;
        }
        self.results.get(product_id)
    }

    /// 重算所有髒產品
    pub fn recalculate(&mut self) -> RecalculationReport {
        let mut report = RecalculationReport::default();
        let mut dirty = self.tracker.dirty_products();
        dirty.sort();

        for product_id in dirty {
            let Some(entry) = self.products.get(&product_id) else {
                self.tracker.clear_one(&product_id);
                continue;
            };

            match self
                .calculator
                .calculate(&entry.input, &self.indirect, &entry.params)
            {
                Ok(result) => {
                    self.results.insert(product_id, result);
                    self.tracker.clear_one(&product_id);
                    report.recalculated.push(product_id);
                }
                Err(e) => {
                    tracing::warn!("產品 {} 重算失敗: {}", entry.input.product.part_number, e);
                    self.results.remove(&product_id);
                    report.failed.push((product_id, e));
                }
            }
        }

        tracing::info!(
            "重算完成：成功 {}，失敗 {}",
            report.recalculated.len(),
            report.failed.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::{CostItemKind, InvestmentCategory, InvestmentItem, LineItem, Product};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn indirect(logistics: i64) -> IndirectCostSet {
        IndirectCostSet::new(
            Decimal::from(10),
            Decimal::from(5),
            Decimal::from(logistics),
            Decimal::from(3),
            Decimal::from(2),
        )
    }

    fn input(part: &str, volume: u64) -> QuoteInput {
        QuoteInput::new(Product::new(part, part, volume))
            .with_line_items(vec![LineItem::new("MAT-01", CostItemKind::Material, Decimal::ONE)
                .with_unit_price(Decimal::from(100))])
            .with_investments(vec![InvestmentItem::new(
                "模具",
                InvestmentCategory::Mold,
                Decimal::from(10_000),
                2,
            )])
    }

    fn session() -> ProjectQuoteSession {
        ProjectQuoteSession::new(QuoteConfig::default(), indirect(4)).unwrap()
    }

    #[test]
    fn test_result_hidden_until_recalculated() {
        let mut session = session();
        let id = session.upsert_product(input("P-1", 1_000), QuoteParameters::default());

        assert!(session.result(&id).is_none());
        let report = session.recalculate();

        assert!(report.is_success());
        assert_eq!(report.recalculated, vec![id]);
        // 100 + 24 + 10000 / 2 / 1000
        assert_eq!(
            session.result(&id).unwrap().breakdown.total_unit_cost,
            Decimal::from(129)
        );
    }

    #[test]
    fn test_indirect_change_invalidates_all_products() {
        let mut session = session();
        let a = session.upsert_product(input("P-1", 1_000), QuoteParameters::default());
        let b = session.upsert_product(input("P-2", 2_000), QuoteParameters::default());
        session.recalculate();

        session.set_indirect_costs(indirect(14)).unwrap();
        assert!(session.result(&a).is_none());
        assert!(session.result(&b).is_none());

        let report = session.recalculate();
        assert_eq!(report.recalculated.len(), 2);
        assert_eq!(
            session.result(&a).unwrap().breakdown.indirect_cost,
            Decimal::from(34)
        );
        assert_eq!(
            session.result(&b).unwrap().breakdown.indirect_cost,
            Decimal::from(34)
        );
    }

    #[test]
    fn test_parameter_change_invalidates_one_product() {
        let mut session = session();
        let a = session.upsert_product(input("P-1", 1_000), QuoteParameters::default());
        let b = session.upsert_product(input("P-2", 2_000), QuoteParameters::default());
        session.recalculate();

        session
            .set_parameters(a, QuoteParameters::margin(Decimal::from(30)))
            .unwrap();

        assert!(session.result(&a).is_none());
        assert!(session.result(&b).is_some());

        let report = session.recalculate();
        assert_eq!(report.recalculated, vec![a]);
        assert_eq!(
            session.result(&a).unwrap().pricing.margin_percent,
            Decimal::from(30)
        );
    }

    #[test]
    fn test_unknown_product_parameters_rejected() {
        let mut session = session();
        let result = session.set_parameters(Uuid::new_v4(), QuoteParameters::default());

        assert!(matches!(
            result,
            Err(QuoteError::Configuration { field: "product_id", .. })
        ));
    }

    #[test]
    fn test_negative_indirect_rejected_and_state_kept() {
        let mut session = session();
        let id = session.upsert_product(input("P-1", 1_000), QuoteParameters::default());
        session.recalculate();

        let mut bad = indirect(4);
        bad.quality = Decimal::from(-1);

        assert!(session.set_indirect_costs(bad).is_err());
        assert_eq!(session.indirect_costs(), &indirect(4));
        assert!(session.result(&id).is_some());
    }

    #[rstest]
    #[case(input("P-1", 0), QuoteParameters::default())]
    #[case(input("P-1", 1_000), QuoteParameters::price(Decimal::from(-5)))]
    #[case(input("P-1", 1_000), QuoteParameters::default().with_amortization_years(0))]
    fn test_failed_product_stays_dirty(#[case] input: QuoteInput, #[case] params: QuoteParameters) {
        let mut session = session();
        let id = session.upsert_product(input, params);

        let report = session.recalculate();

        assert_eq!(report.failed.len(), 1);
        assert!(session.is_dirty(&id));
        assert!(session.result(&id).is_none());
    }

    #[test]
    fn test_remove_product() {
        let mut session = session();
        let id = session.upsert_product(input("P-1", 1_000), QuoteParameters::default());
        session.recalculate();

        let removed = session.remove_product(&id).unwrap();

        assert_eq!(removed.product.part_number, "P-1");
        assert!(session.result(&id).is_none());
        assert!(session.product_ids().is_empty());
        assert!(session.recalculate().recalculated.is_empty());
    }
}
