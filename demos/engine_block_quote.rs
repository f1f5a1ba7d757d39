//! 發動機缸體報價示例

use chrono::NaiveDate;
use quote_calc::{QuoteCalculator, QuoteInput, QuoteParameters};
use quote_core::{
    round_display, IndirectCostSet, InvestmentCategory, InvestmentItem, MaterialRecord,
    ProcessRate, ProcessRecord, Product, QuoteConfig, RecoveryValue,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== 發動機缸體報價示例 ===\n");

    let sop = NaiveDate::from_ymd_opt(2026, 3, 1).ok_or_else(|| anyhow::anyhow!("無效的 SOP 日期"))?;
    let product = Product::new("Engine Block", "EB-2024-001", 100_000)
        .with_order_quantity(1_000)
        .with_sop_date(sop);

    let materials = vec![MaterialRecord::new("AL-A380", "鋁合金錠", Decimal::new(45, 1))
        .with_unit("kg")
        .with_std_price(Decimal::from(19))
        .with_vave_price(Decimal::new(175, 1))];
    let processes = vec![ProcessRecord::new("OP-10", "壓鑄+加工", Decimal::new(15, 1))
        .with_rate(ProcessRate::new(Decimal::from(400), Decimal::from(90)))];
    let investments = vec![
        InvestmentItem::new("缸體模具", InvestmentCategory::Mold, Decimal::from(15_000), 5),
        InvestmentItem::new("加工夾具", InvestmentCategory::Jig, Decimal::from(21_000), 5),
        InvestmentItem::new("檢具", InvestmentCategory::Gauge, Decimal::from(8_500), 5),
        InvestmentItem::new("試驗台", InvestmentCategory::Test, Decimal::from(3_500), 5),
    ];
    let input = QuoteInput::from_records(product, &materials, &processes, &[], investments)?;

    let indirect = IndirectCostSet::new(
        Decimal::new(22050, 2),
        Decimal::new(25800, 2),
        Decimal::new(15000, 2),
        Decimal::new(12000, 2),
        Decimal::new(8000, 2),
    );

    let calculator = QuoteCalculator::new(QuoteConfig::default());
    let result = calculator.calculate(&input, &indirect, &QuoteParameters::default())?;

    let b = result.breakdown.rounded();
    println!("成本拆解:");
    println!("  - 直接成本: {}", b.direct_cost);
    println!("  - 間接費用: {}", b.indirect_cost);
    println!("  - 單件攤銷: {}", result.breakdown.amortized_cost);
    println!("  - QS 成本:  {}", b.total_unit_cost);
    println!("  - VAVE 成本: {}", b.vave_total_unit_cost);

    println!("\n攤銷計劃:");
    for amortization in &result.amortizations {
        println!(
            "  {} 投資 {}，年攤銷 {}",
            amortization.name,
            amortization.total_investment,
            round_display(amortization.annual_amortization)
        );
        for entry in &amortization.schedule {
            println!(
                "    {:?} 第 {} 年: 累計 {}，剩餘 {}",
                entry.calendar_year,
                entry.year,
                round_display(entry.cumulative_amortization),
                round_display(entry.remaining_investment)
            );
        }
    }

    let pricing = &result.pricing;
    println!("\n定價（利潤率 {}%）:", pricing.margin_percent);
    println!("  - 單價: {}", round_display(pricing.unit_price));
    println!("  - 單件利潤: {}", round_display(pricing.unit_profit));
    println!("  - 年營收: {}", round_display(pricing.annual_revenue));

    if let Some(financials) = &result.financials {
        println!("\n投資回收:");
        println!("  - NPV: {}", round_display(financials.npv));
        match financials.irr_percent {
            Some(irr) => println!("  - IRR: {}%", round_display(irr)),
            None => println!("  - IRR: 區間內無解"),
        }
        match financials.payback_period_years {
            RecoveryValue::Value(years) => println!("  - 回收期: {} 年", round_display(years)),
            RecoveryValue::Unreachable => println!("  - 回收期: 無法回收"),
        }
        let verdict = &financials.verdict;
        println!(
            "  - 評估: NPV {:?}，IRR {:?}，回收期 {:?}",
            verdict.npv, verdict.irr, verdict.payback
        );
    }

    if !result.warnings.is_empty() {
        println!("\n警告:");
        for warning in &result.warnings {
            println!(
                "  [{:?}/{:?}] {}: {}",
                warning.severity, warning.kind, warning.subject, warning.message
            );
        }
    }

    Ok(())
}
