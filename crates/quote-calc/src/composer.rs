//! QS 成本組合

use quote_core::{try_add, try_sum, CostBreakdown, InvestmentAmortization, Result};
use rust_decimal::Decimal;

use crate::aggregation::BomCostSummary;

/// QS 成本組合器
pub struct QuoteCostComposer;

impl QuoteCostComposer {
    /// QS 成本 = 直接成本 + 間接費用 + Σ 單件攤銷
    ///
    /// 投資項的加總順序不影響結果。
    pub fn compose(
        bom: &BomCostSummary,
        indirect_total: Decimal,
        amortizations: &[InvestmentAmortization],
    ) -> Result<CostBreakdown> {
        let amortized_cost = try_sum(
            amortizations.iter().map(|a| a.per_unit_amortization),
            "amortized_cost",
        )?;

        let upfront_investment = try_sum(
            amortizations
                .iter()
                .filter(|a| a.is_upfront())
                .map(|a| a.total_investment),
            "upfront_investment",
        )?;

        let direct_cost = bom.direct_cost.std;
        let total_unit_cost = try_sum(
            [direct_cost, indirect_total, amortized_cost],
            "total_unit_cost",
        )?;
        let vave_total_unit_cost = try_add(
            bom.direct_cost.vave,
            try_add(indirect_total, amortized_cost, "vave_total_unit_cost")?,
            "vave_total_unit_cost",
        )?;

        Ok(CostBreakdown {
            direct_cost,
            material_cost: bom.material_cost.std,
            process_cost: bom.process_cost.std,
            other_cost: bom.other_cost.std,
            indirect_cost: indirect_total,
            amortized_cost,
            total_unit_cost,
            vave_total_unit_cost,
            upfront_investment,
            is_complete: bom.is_complete,
            unpriced_count: bom.unpriced_count,
        })
    }
}
