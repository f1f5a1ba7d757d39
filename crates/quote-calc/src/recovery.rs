//! 投資回收分析（NPV / IRR / 回收期 / ROI）
//!
//! 無狀態純計算，每次參數變動（利潤率、攤銷年限、折現率）都整份重算。

use quote_core::{
    try_add, try_div, try_mul, try_sub, CashFlowEntry, FinancialMetrics, InvestmentVerdict,
    IrrMethod, QuoteConfig, QuoteError, RecoveryValue, Result,
};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// 回收分析輸入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryInput {
    /// 需回收的投資總額
    pub total_investment: Decimal,
    /// 年利潤 = 單件利潤 × 年產量
    pub annual_profit: Decimal,
}

impl RecoveryInput {
    pub fn new(total_investment: Decimal, annual_profit: Decimal) -> Self {
        Self {
            total_investment,
            annual_profit,
        }
    }
}

/// 投資回收分析器
pub struct RecoveryAnalyzer;

impl RecoveryAnalyzer {
    /// 計算財務指標
    ///
    /// 年淨現金流 = 年利潤 × `recovery_fraction`；NPV 以此折現，
    /// 回收期與 ROI 則直接使用年利潤。
    pub fn analyze(input: RecoveryInput, config: &QuoteConfig) -> Result<FinancialMetrics> {
        config.validate()?;
        if input.total_investment <= Decimal::ZERO {
            return Err(QuoteError::config("total_investment", "必須大於 0"));
        }

        let investment = input.total_investment;
        let net_cash_flow = try_mul(input.annual_profit, config.recovery_fraction, "net_cash_flow")?;
        let growth = Decimal::ONE + config.discount_rate;

        let mut cash_flows = Vec::with_capacity(config.horizon_years as usize);
        let mut factor = Decimal::ONE;
        let mut cumulative = Decimal::ZERO;
        let mut cumulative_discounted = Decimal::ZERO;
        let mut discounted_payback_year = None;

        for year in 1..=config.horizon_years {
            factor = factor
                .checked_mul(growth)
                .ok_or_else(|| QuoteError::Overflow("折現係數".to_string()))?;
            let discounted = try_div(net_cash_flow, factor, "discounted_cash_flow")?;
            cumulative = try_add(cumulative, net_cash_flow, "cumulative_cash_flow")?;
            cumulative_discounted =
                try_add(cumulative_discounted, discounted, "cumulative_discounted")?;

            if discounted_payback_year.is_none() && cumulative_discounted >= investment {
                discounted_payback_year = Some(year);
            }

            cash_flows.push(CashFlowEntry {
                year,
                net_cash_flow,
                discounted_cash_flow: discounted,
                cumulative_cash_flow: cumulative,
                cumulative_discounted,
            });
        }

        let npv = try_sub(cumulative_discounted, investment, "npv")?;

        let (payback_period_years, roi_percent) = if input.annual_profit <= Decimal::ZERO {
            tracing::warn!("年利潤 {} 不大於 0，投資無法回收", input.annual_profit);
            (RecoveryValue::Unreachable, RecoveryValue::Unreachable)
        } else {
            let horizon_profit = try_mul(
                input.annual_profit,
                Decimal::from(config.horizon_years),
                "horizon_profit",
            )?;
            let payback = try_div(investment, input.annual_profit, "payback_period_years")?;
            let roi = try_mul(
                try_div(
                    try_sub(horizon_profit, investment, "roi_percent")?,
                    investment,
                    "roi_percent",
                )?,
                HUNDRED,
                "roi_percent",
            )?;
            (RecoveryValue::Value(payback), RecoveryValue::Value(roi))
        };

        let irr_percent = match config.irr_method {
            IrrMethod::Approximation => Some(try_mul(
                try_div(net_cash_flow, investment, "irr_percent")?,
                HUNDRED,
                "irr_percent",
            )?),
            IrrMethod::Bisection { .. } => {
                match solve_irr(investment, net_cash_flow, config.horizon_years, &config.irr_method)
                {
                    Ok(rate) => Some(try_mul(rate, HUNDRED, "irr_percent")?),
                    Err(QuoteError::IrrNotBracketed { lower, upper }) => {
                        tracing::warn!("IRR 在 [{}, {}] 內無解", lower, upper);
                        None
                    }
                    Err(QuoteError::IrrNotConverged {
                        iterations,
                        residual,
                    }) => {
                        tracing::warn!("IRR 經 {} 次迭代未收斂，殘差 {}", iterations, residual);
                        None
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let verdict = InvestmentVerdict::assess(
            npv,
            irr_percent,
            try_mul(config.discount_rate, HUNDRED, "discount_rate")?,
            payback_period_years,
        );

        tracing::debug!(
            "回收分析：投資 {}，年利潤 {}，NPV {}，IRR {:?}",
            investment,
            input.annual_profit,
            npv,
            irr_percent
        );

        Ok(FinancialMetrics {
            total_investment: investment,
            annual_profit: input.annual_profit,
            net_cash_flow,
            discount_rate: config.discount_rate,
            recovery_fraction: config.recovery_fraction,
            horizon_years: config.horizon_years,
            npv,
            irr_percent,
            irr_method: config.irr_method,
            payback_period_years,
            roi_percent,
            discounted_payback_year,
            verdict,
            cash_flows,
        })
    }
}

/// 以二分法求 NPV = 0 的折現率（小數，0.12 = 12%）
///
/// 現金流為每年固定的 `net_cash_flow`，第 0 年投入 `total_investment`。
/// 區間兩端 NPV 同號時回傳 `IrrNotBracketed`；
/// 用盡 `max_iterations` 仍未達容差時回傳 `IrrNotConverged`。
pub fn solve_irr(
    total_investment: Decimal,
    net_cash_flow: Decimal,
    horizon_years: u32,
    method: &IrrMethod,
) -> Result<Decimal> {
    let IrrMethod::Bisection {
        lower,
        upper,
        tolerance,
        max_iterations,
    } = *method
    else {
        return Err(QuoteError::config("irr_method", "需使用二分法"));
    };

    let investment = total_investment
        .to_f64()
        .ok_or_else(|| QuoteError::Overflow("投資總額".to_string()))?;
    let cash = net_cash_flow
        .to_f64()
        .ok_or_else(|| QuoteError::Overflow("淨現金流".to_string()))?;

    let npv_at = |rate: f64| -> f64 {
        (1..=horizon_years as i32).fold(-investment, |acc, t| acc + cash / (1.0 + rate).powi(t))
    };

    let (mut lo, mut hi) = (lower, upper);
    let (mut npv_lo, npv_hi) = (npv_at(lo), npv_at(hi));
    if !(npv_lo.is_finite() && npv_hi.is_finite()) || npv_lo.signum() == npv_hi.signum() {
        if npv_lo == 0.0 {
            return to_rate(lo);
        }
        if npv_hi == 0.0 {
            return to_rate(hi);
        }
        return Err(QuoteError::IrrNotBracketed { lower, upper });
    }

    // 容差相對於投資規模
    let threshold = tolerance * investment.abs().max(1.0);
    let mut residual = npv_lo;
    for _ in 0..max_iterations {
        let mid = (lo + hi) / 2.0;
        let npv_mid = npv_at(mid);
        if npv_mid.abs() <= threshold {
            return to_rate(mid);
        }
        if npv_mid.signum() == npv_lo.signum() {
            lo = mid;
            npv_lo = npv_mid;
        } else {
            hi = mid;
        }
        residual = npv_mid;
    }

    Err(QuoteError::IrrNotConverged {
        iterations: max_iterations,
        residual,
    })
}

fn to_rate(rate: f64) -> Result<Decimal> {
    Decimal::from_f64(rate)
        .map(|r| r.round_dp(8))
        .ok_or_else(|| QuoteError::Overflow("IRR".to_string()))
}
