//! 多年度 Business Case 分析

use quote_core::{
    try_add, try_div, try_mul, try_sub, try_sum, BusinessCase, BusinessCaseParams, FinancialYear,
    FinancialYearResult, QuoteError, Result,
};
use rust_decimal::Decimal;

use crate::QuoteResult;

/// 營運資金利息按 360 天計年
const DAYS_PER_YEAR: u32 = 360;

/// Business Case 分析器
pub struct BusinessCaseAnalyzer;

impl BusinessCaseAnalyzer {
    /// 逐年計算 SK、DB I、DB IV，並彙總生命週期指標
    ///
    /// 年份需嚴格遞增。未指定淨單價的年度以前一年淨單價乘 (1 - 降價比例) 推得，
    /// 首年的前一年淨單價即基準單價。
    pub fn analyze(params: &BusinessCaseParams, years: &[FinancialYear]) -> Result<BusinessCase> {
        params.validate()?;
        if years.is_empty() {
            return Err(QuoteError::config("years", "至少需要一個年度"));
        }
        if years.windows(2).any(|pair| pair[1].year <= pair[0].year) {
            return Err(QuoteError::config("years", "年份必須嚴格遞增且不可重複"));
        }

        let mut results = Vec::with_capacity(years.len());
        let mut previous_price = params.base_price;

        for year in years {
            year.validate()?;
            let result = Self::analyze_year(params, year, previous_price)?;
            previous_price = result.net_price;

            tracing::debug!(
                "{} 年：淨銷售額 {}，SK {}，DB IV {}",
                result.year,
                result.net_sales,
                result.sk_cost,
                result.db_4
            );
            results.push(result);
        }

        let total_lifetime_volume = results.iter().try_fold(0u64, |acc, y| {
            acc.checked_add(y.volume)
                .ok_or_else(|| QuoteError::Overflow("total_lifetime_volume".to_string()))
        })?;
        let total_db_4 = try_sum(results.iter().map(|y| y.db_4), "total_db_4")?;
        let break_even_year = results.iter().find(|y| y.breaks_even()).map(|y| y.year);

        tracing::info!(
            "Business Case：{} 個年度，總銷量 {}，DB IV 合計 {}，損益平衡年 {:?}",
            results.len(),
            total_lifetime_volume,
            total_db_4,
            break_even_year
        );

        Ok(BusinessCase {
            params: *params,
            years: results,
            total_lifetime_volume,
            total_db_4,
            break_even_year,
        })
    }

    fn analyze_year(
        params: &BusinessCaseParams,
        year: &FinancialYear,
        previous_price: Decimal,
    ) -> Result<FinancialYearResult> {
        let volume = Decimal::from(year.volume);
        let net_price = match year.net_price {
            Some(price) => price,
            None => try_mul(
                previous_price,
                Decimal::ONE - year.reduction_rate,
                "net_price",
            )?,
        };

        let gross_sales = try_mul(params.base_price, volume, "gross_sales")?;
        let net_sales = try_mul(net_price, volume, "net_sales")?;
        let overhead_sa = try_mul(net_sales, params.sa_rate, "overhead_sa")?;

        // 淨單價 × 利率 × 帳期 / 360 × 銷量
        let working_capital_interest = try_div(
            try_mul(
                try_mul(net_sales, params.working_capital_rate, "working_capital_interest")?,
                Decimal::from(params.payment_terms_days),
                "working_capital_interest",
            )?,
            Decimal::from(DAYS_PER_YEAR),
            "working_capital_interest",
        )?;

        let sk_cost = try_sum(
            [
                year.hk_3_cost,
                year.recovery_tooling,
                year.recovery_rnd,
                overhead_sa,
                working_capital_interest,
            ],
            "sk_cost",
        )?;

        Ok(FinancialYearResult {
            year: year.year,
            volume: year.volume,
            net_price,
            gross_sales,
            net_sales,
            hk_3_cost: year.hk_3_cost,
            recovery_tooling: year.recovery_tooling,
            recovery_rnd: year.recovery_rnd,
            overhead_sa,
            working_capital_interest,
            sk_cost,
            db_1: try_sub(net_sales, year.hk_3_cost, "db_1")?,
            db_4: try_sub(net_sales, sk_cost, "db_4")?,
        })
    }

    /// 以單件報價結果建立年度輸入
    ///
    /// HK III = 直接成本 + 間接費用（單件）× 銷量；模具回收 = 單件攤銷 × 銷量。
    /// 淨單價取報價單價。
    pub fn year_from_quote(quote: &QuoteResult, year: i32, volume: u64) -> Result<FinancialYear> {
        let breakdown = &quote.breakdown;
        let units = Decimal::from(volume);
        let unit_hk_3 = try_add(breakdown.direct_cost, breakdown.indirect_cost, "hk_3_cost")?;

        Ok(FinancialYear::new(year, volume, try_mul(unit_hk_3, units, "hk_3_cost")?)
            .with_net_price(quote.pricing.unit_price)
            .with_recovery_tooling(try_mul(
                breakdown.amortized_cost,
                units,
                "recovery_tooling",
            )?))
    }
}
