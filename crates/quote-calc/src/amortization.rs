//! NRE 攤銷計劃
//!
//! 直線法：年攤銷額 = 攤銷基數 / 年限，單件攤銷額 = 年攤銷額 / 年產量。

use quote_core::{
    AmortizationMode, AmortizationScheduleEntry, AmortizationStrategy, InvestmentAmortization,
    InvestmentItem, Product, QuoteError, Result,
};
use rust_decimal::Decimal;

/// 攤銷計劃器
pub struct AmortizationScheduler;

impl AmortizationScheduler {
    /// 計算單一投資項的攤銷
    ///
    /// # 參數
    /// * `years_override` - 年限選擇器的值，Some 時取代投資項自身年限
    /// * `start_year` - 量產首年，用於標記日曆年
    pub fn schedule(
        investment: &InvestmentItem,
        annual_volume: u64,
        strategy: &AmortizationStrategy,
        years_override: Option<u32>,
        start_year: Option<i32>,
    ) -> Result<InvestmentAmortization> {
        // 先驗證，避免任何除以 0
        investment.validate()?;
        let years = years_override.unwrap_or(investment.amortization_years);
        if years == 0 {
            return Err(QuoteError::config("amortization_years", "必須至少為 1"));
        }
        if annual_volume == 0 {
            return Err(QuoteError::config("annual_volume", "必須大於 0"));
        }

        if strategy.mode == AmortizationMode::Upfront {
            tracing::debug!("投資 {} 一次性支付，不進單價", investment.name);
            return Ok(InvestmentAmortization {
                investment_id: investment.id,
                name: investment.name.clone(),
                mode: AmortizationMode::Upfront,
                total_investment: investment.total_investment,
                amortization_base: investment.total_investment,
                amortization_years: years,
                annual_amortization: Decimal::ZERO,
                per_unit_amortization: Decimal::ZERO,
                schedule: Vec::new(),
            });
        }

        let years_dec = Decimal::from(years);
        let base = Self::amortization_base(investment.total_investment, strategy.interest_rate, years)?;
        let annual_amortization = base / years_dec;
        let per_unit_amortization = annual_amortization / Decimal::from(annual_volume);

        let mut schedule = Vec::with_capacity(years as usize);
        let mut cumulative = Decimal::ZERO;
        for year in 1..=years {
            // 最後一年吸收小數殘差，保證累計 = 基數、剩餘 = 0
            let yearly = if year == years {
                base - cumulative
            } else {
                annual_amortization
            };
            cumulative += yearly;

            schedule.push(AmortizationScheduleEntry {
                year,
                calendar_year: start_year.map(|y| y + (year as i32 - 1)),
                units_produced: annual_volume,
                yearly_amortization: yearly,
                cumulative_amortization: cumulative,
                remaining_investment: (base - cumulative).max(Decimal::ZERO),
            });
        }

        tracing::debug!(
            "投資 {} 攤銷：基數 {}，{} 年，年攤銷 {}，單件 {}",
            investment.name,
            base,
            years,
            annual_amortization,
            per_unit_amortization
        );

        Ok(InvestmentAmortization {
            investment_id: investment.id,
            name: investment.name.clone(),
            mode: AmortizationMode::Amortized,
            total_investment: investment.total_investment,
            amortization_base: base,
            amortization_years: years,
            annual_amortization,
            per_unit_amortization,
            schedule,
        })
    }

    /// 計算產品全部投資項的攤銷
    pub fn schedule_all(
        investments: &[InvestmentItem],
        product: &Product,
        strategy: &AmortizationStrategy,
        years_override: Option<u32>,
    ) -> Result<Vec<InvestmentAmortization>> {
        investments
            .iter()
            .map(|investment| {
                Self::schedule(
                    investment,
                    product.annual_volume,
                    strategy,
                    years_override,
                    product.start_year(),
                )
            })
            .collect()
    }

    /// 攤銷基數 = 投資 × (1 + 年利率 × 年限)
    fn amortization_base(total: Decimal, interest_rate: Decimal, years: u32) -> Result<Decimal> {
        let factor = interest_rate
            .checked_mul(Decimal::from(years))
            .and_then(|r| r.checked_add(Decimal::ONE))
            .ok_or_else(|| QuoteError::Overflow("攤銷利息係數".to_string()))?;
        total
            .checked_mul(factor)
            .ok_or_else(|| QuoteError::Overflow("攤銷基數".to_string()))
    }
}
