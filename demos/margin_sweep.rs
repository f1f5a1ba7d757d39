//! 利潤率與攤銷年限掃描示例
//!
//! 模擬使用者拖動利潤率滑桿、切換攤銷年限，每次都整份重算。

use quote_cache::ProjectQuoteSession;
use quote_calc::{PricingCalculator, QuoteInput, QuoteParameters};
use quote_core::{
    round_display, CostItemKind, IndirectCostSet, InvestmentCategory, InvestmentItem, LineItem,
    Product, QuoteConfig,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== 利潤率掃描示例 ===\n");

    let input = QuoteInput::new(Product::new("Bracket", "BR-100", 5_000).with_order_quantity(500))
        .with_line_items(vec![
            LineItem::new("STEEL-01", CostItemKind::Material, Decimal::new(12, 1))
                .with_unit_price(Decimal::new(850, 2)),
            LineItem::new("OP-STAMP", CostItemKind::Process, Decimal::new(5, 2))
                .with_unit_price(Decimal::from(320)),
        ])
        .with_investments(vec![InvestmentItem::new(
            "沖壓模",
            InvestmentCategory::Mold,
            Decimal::from(60_000),
            3,
        )]);

    let indirect = IndirectCostSet::new(
        Decimal::from(4),
        Decimal::new(15, 1),
        Decimal::ONE,
        Decimal::ONE,
        Decimal::new(5, 1),
    );
    let mut session = ProjectQuoteSession::new(QuoteConfig::default(), indirect)?;
    let id = session.upsert_product(input.clone(), QuoteParameters::default());

    println!("{:>6} {:>6} {:>10} {:>10} {:>12} {:>10}", "年限", "利潤率", "QS成本", "單價", "NPV", "回收期");
    for years in [2u32, 3, 5] {
        for margin in [5i64, 15, 25, 35] {
            let params = QuoteParameters::margin(Decimal::from(margin)).with_amortization_years(years);
            session.set_parameters(id, params)?;

            let report = session.recalculate();
            if let Some((_, e)) = report.failed.first() {
                anyhow::bail!("重算失敗: {}", e);
            }

            let result = session
                .result(&id)
                .ok_or_else(|| anyhow::anyhow!("產品 {} 沒有結果", id))?;
            let (npv, payback) = match &result.financials {
                Some(f) => (
                    round_display(f.npv).to_string(),
                    f.payback_period_years
                        .value()
                        .map(|v| round_display(v).to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                None => ("-".to_string(), "-".to_string()),
            };

            println!(
                "{:>6} {:>6} {:>10} {:>10} {:>12} {:>10}",
                years,
                margin,
                round_display(result.breakdown.total_unit_cost),
                round_display(result.pricing.unit_price),
                npv,
                payback
            );
        }
    }

    // 預設策略比較
    let cost = session
        .result(&id)
        .map(|r| r.breakdown.total_unit_cost)
        .ok_or_else(|| anyhow::anyhow!("產品 {} 沒有結果", id))?;
    println!("\n定價策略:");
    for (strategy, scenario) in PricingCalculator::compare_strategies(cost, &input.product)? {
        println!(
            "  {:?}: 利潤率 {}%，單價 {}",
            strategy,
            scenario.margin_percent,
            round_display(scenario.unit_price)
        );
    }

    Ok(())
}
