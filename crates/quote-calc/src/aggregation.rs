//! BOM 直接成本彙總

use quote_core::{try_add, CostItemKind, LineItem, PricePair, QuoteError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// BOM 直接成本彙總結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomCostSummary {
    /// 物料成本（雙軌）
    pub material_cost: PricePair,
    /// 工藝成本（雙軌）
    pub process_cost: PricePair,
    /// 其他單件費用（雙軌）
    pub other_cost: PricePair,
    /// 直接成本合計
    pub direct_cost: PricePair,

    /// 已定價項目數
    pub priced_count: usize,
    /// 未定價項目數
    pub unpriced_count: usize,
    /// 未定價項目編號
    pub unpriced_items: Vec<String>,

    /// 是否全數定價；false 時 0 成本不可視為真實的 0
    pub is_complete: bool,
}

impl BomCostSummary {
    /// 標準口徑的直接成本
    pub fn direct_cost(&self) -> Decimal {
        self.direct_cost.std
    }

    /// 要求 BOM 完整，否則回傳 IncompleteData
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete {
            Ok(())
        } else {
            Err(QuoteError::IncompleteData {
                count: self.unpriced_count,
                items: self.unpriced_items.clone(),
            })
        }
    }
}

/// BOM 成本彙總器
pub struct BomAggregator;

impl BomAggregator {
    /// 彙總直接成本
    ///
    /// 直接成本 = Σ(用量 × 單價)，只計已定價項目；未定價項目另列。
    /// 投資類明細行不屬於直接成本，於此略過。
    pub fn aggregate(items: &[LineItem]) -> Result<BomCostSummary> {
        let mut material = (Decimal::ZERO, Decimal::ZERO);
        let mut process = (Decimal::ZERO, Decimal::ZERO);
        let mut other = (Decimal::ZERO, Decimal::ZERO);
        let mut priced_count = 0;
        let mut unpriced_items = Vec::new();

        for item in items {
            if !item.kind.is_direct() {
                tracing::debug!("明細行 {} 非直接成本（{:?}），略過", item.id, item.kind);
                continue;
            }
            item.validate()?;

            let (Some(std_cost), Some(vave_cost)) =
                (item.extended_cost()?, item.vave_extended_cost()?)
            else {
                unpriced_items.push(item.id.clone());
                continue;
            };

            let (bucket, field) = match item.kind {
                CostItemKind::Material => (&mut material, "material_cost"),
                CostItemKind::Process => (&mut process, "process_cost"),
                _ => (&mut other, "other_cost"),
            };
            bucket.0 = try_add(bucket.0, std_cost, field)?;
            bucket.1 = try_add(bucket.1, vave_cost, field)?;
            priced_count += 1;
        }

        let material_cost = PricePair::new(material.0, material.1);
        let process_cost = PricePair::new(process.0, process.1);
        let other_cost = PricePair::new(other.0, other.1);
        let direct_cost = material_cost
            .try_add(process_cost, "direct_cost")?
            .try_add(other_cost, "direct_cost")?;

        if !unpriced_items.is_empty() {
            tracing::warn!(
                "BOM 有 {} 筆項目未定價: {:?}",
                unpriced_items.len(),
                unpriced_items
            );
        }

        Ok(BomCostSummary {
            material_cost,
            process_cost,
            other_cost,
            direct_cost,
            priced_count,
            unpriced_count: unpriced_items.len(),
            is_complete: unpriced_items.is_empty(),
            unpriced_items,
        })
    }
}
