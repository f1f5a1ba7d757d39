//! 定價與利潤率換算
//!
//! 兩種模式互斥：
//! - 輸入單價：單件利潤 = 單價 - QS 成本，利潤率 = 單件利潤 / QS 成本 × 100
//! - 輸入利潤率：單件利潤 = QS 成本 × 利潤率 / 100，單價 = QS 成本 + 單件利潤

use quote_core::{
    try_add, try_div, try_mul, try_sub, PricingInput, PricingMode, PricingScenario,
    PricingStrategy, Product, QuoteError, Result,
};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// 定價計算器
pub struct PricingCalculator;

impl PricingCalculator {
    /// 計算定價情境
    ///
    /// 非驅動欄位每次都重新推算，不沿用上一次的結果。
    pub fn evaluate(
        total_unit_cost: Decimal,
        input: PricingInput,
        product: &Product,
    ) -> Result<PricingScenario> {
        if total_unit_cost < Decimal::ZERO {
            return Err(QuoteError::config("total_unit_cost", "不可為負"));
        }

        let (unit_price, margin_percent, unit_profit) = match input {
            PricingInput::UnitPrice(price) => {
                if price < Decimal::ZERO {
                    return Err(QuoteError::config("unit_price", "不可為負"));
                }
                if total_unit_cost.is_zero() {
                    return Err(QuoteError::UndefinedMargin);
                }
                let profit = try_sub(price, total_unit_cost, "unit_profit")?;
                let margin = try_mul(
                    try_div(profit, total_unit_cost, "margin_percent")?,
                    HUNDRED,
                    "margin_percent",
                )?;
                (price, margin, profit)
            }
            PricingInput::MarginPercent(margin) => {
                if margin < -HUNDRED {
                    return Err(QuoteError::config("margin_percent", "不可低於 -100"));
                }
                let profit = try_mul(total_unit_cost, margin, "unit_profit")? / HUNDRED;
                (try_add(total_unit_cost, profit, "unit_price")?, margin, profit)
            }
        };

        let annual_volume = Decimal::from(product.annual_volume);

        Ok(PricingScenario {
            mode: input.mode(),
            input_value: input.value(),
            total_unit_cost,
            unit_price,
            margin_percent,
            unit_profit,
            order_revenue: try_mul(unit_price, product.order_quantity_decimal(), "order_revenue")?,
            annual_revenue: try_mul(unit_price, annual_volume, "annual_revenue")?,
            annual_profit: try_mul(unit_profit, annual_volume, "annual_profit")?,
        })
    }

    /// 以預設策略（保守/平衡/激進）各算一次
    pub fn compare_strategies(
        total_unit_cost: Decimal,
        product: &Product,
    ) -> Result<Vec<(PricingStrategy, PricingScenario)>> {
        PricingStrategy::ALL
            .iter()
            .map(|&strategy| {
                Self::evaluate(total_unit_cost, strategy.into(), product)
                    .map(|scenario| (strategy, scenario))
            })
            .collect()
    }

    /// 切換模式：以目前情境的推算值作為新模式的輸入
    pub fn switch_mode(
        scenario: &PricingScenario,
        target: PricingMode,
        product: &Product,
    ) -> Result<PricingScenario> {
        let input = match target {
            PricingMode::PriceGiven => PricingInput::UnitPrice(scenario.unit_price),
            PricingMode::MarginGiven => PricingInput::MarginPercent(scenario.margin_percent),
        };
        Self::evaluate(scenario.total_unit_cost, input, product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn product() -> Product {
        Product::new("Engine Block", "EB-001", 100_000).with_order_quantity(1_000)
    }

    #[test]
    fn test_margin_given() {
        let scenario = PricingCalculator::evaluate(
            Decimal::new(1649096, 3),
            PricingInput::MarginPercent(Decimal::from(15)),
            &product(),
        )
        .unwrap();

        assert_eq!(scenario.mode, PricingMode::MarginGiven);
        assert_eq!(scenario.unit_price, Decimal::new(18964604, 4));
        assert_eq!(scenario.unit_profit, Decimal::new(2473644, 4));
        assert_eq!(scenario.order_revenue, Decimal::new(18964604, 1));
        assert_eq!(scenario.annual_revenue, Decimal::from(189_646_040));
    }

    #[test]
    fn test_price_given() {
        let scenario = PricingCalculator::evaluate(
            Decimal::from(80),
            PricingInput::UnitPrice(Decimal::from(100)),
            &product(),
        )
        .unwrap();

        assert_eq!(scenario.mode, PricingMode::PriceGiven);
        assert_eq!(scenario.unit_profit, Decimal::from(20));
        assert_eq!(scenario.margin_percent, Decimal::from(25));
        assert_eq!(scenario.annual_profit, Decimal::from(2_000_000));
    }

    #[test]
    fn test_price_below_cost_gives_negative_margin() {
        let scenario = PricingCalculator::evaluate(
            Decimal::from(100),
            PricingInput::UnitPrice(Decimal::from(90)),
            &product(),
        )
        .unwrap();

        assert_eq!(scenario.unit_profit, Decimal::from(-10));
        assert_eq!(scenario.margin_percent, Decimal::from(-10));
    }

    #[test]
    fn test_undefined_margin_on_zero_cost() {
        let result = PricingCalculator::evaluate(
            Decimal::ZERO,
            PricingInput::UnitPrice(Decimal::from(10)),
            &product(),
        );

        assert_eq!(result, Err(QuoteError::UndefinedMargin));
    }

    #[rstest]
    #[case(PricingInput::UnitPrice(Decimal::from(-1)), "unit_price")]
    #[case(PricingInput::MarginPercent(Decimal::from(-101)), "margin_percent")]
    fn test_invalid_inputs(#[case] input: PricingInput, #[case] expected_field: &str) {
        match PricingCalculator::evaluate(Decimal::from(50), input, &product()) {
            Err(QuoteError::Configuration { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[rstest]
    #[case(PricingStrategy::Conservative, 115)]
    #[case(PricingStrategy::Balanced, 125)]
    #[case(PricingStrategy::Aggressive, 135)]
    fn test_strategy_prices(#[case] strategy: PricingStrategy, #[case] expected_price: i64) {
        let scenarios = PricingCalculator::compare_strategies(Decimal::from(100), &product()).unwrap();
        let (_, scenario) = scenarios.iter().find(|(s, _)| *s == strategy).unwrap();

        assert_eq!(scenario.unit_price, Decimal::from(expected_price));
    }

    #[test]
    fn test_switch_mode_recomputes() {
        let margin_scenario = PricingCalculator::evaluate(
            Decimal::from(200),
            PricingInput::MarginPercent(Decimal::from(20)),
            &product(),
        )
        .unwrap();

        let price_scenario =
            PricingCalculator::switch_mode(&margin_scenario, PricingMode::PriceGiven, &product())
                .unwrap();

        assert_eq!(price_scenario.mode, PricingMode::PriceGiven);
        assert_eq!(price_scenario.input_value, Decimal::from(240));
        assert_eq!(price_scenario.margin_percent, Decimal::from(20));
    }

    #[test]
    fn test_revenue_overflow_is_error() {
        let product = Product::new("Huge", "HUGE-01", u64::MAX);

        let result = PricingCalculator::evaluate(
            Decimal::from(10_000_000_000i64),
            PricingInput::MarginPercent(Decimal::from(10)),
            &product,
        );

        assert_eq!(result, Err(QuoteError::Overflow("annual_revenue".to_string())));
    }

    proptest! {
        #[test]
        fn margin_round_trip(cost_cents in 1i64..100_000_000, margin_bp in 0i64..50_000) {
            let cost = Decimal::new(cost_cents, 2);
            let margin = Decimal::new(margin_bp, 2);

            let forward = PricingCalculator::evaluate(
                cost,
                PricingInput::MarginPercent(margin),
                &product(),
            ).unwrap();
            let back = PricingCalculator::evaluate(
                cost,
                PricingInput::UnitPrice(forward.unit_price),
                &product(),
            ).unwrap();

            prop_assert!((back.margin_percent - margin).abs() < Decimal::new(1, 12));
        }

        #[test]
        fn margin_monotonic(cost_cents in 1i64..100_000_000, margin_bp in 0i64..50_000) {
            let cost = Decimal::new(cost_cents, 2);
            let low = PricingCalculator::evaluate(
                cost,
                PricingInput::MarginPercent(Decimal::new(margin_bp, 2)),
                &product(),
            ).unwrap();
            let high = PricingCalculator::evaluate(
                cost,
                PricingInput::MarginPercent(Decimal::new(margin_bp + 1, 2)),
                &product(),
            ).unwrap();

            prop_assert!(high.unit_price > low.unit_price);
            prop_assert!(high.unit_profit > low.unit_profit);
            prop_assert!(high.annual_revenue > low.annual_revenue);
        }
    }
}
