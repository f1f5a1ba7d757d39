//! 報價計算配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{QuoteError, Result};

/// 計劃時界上限（年）
pub const MAX_HORIZON_YEARS: u32 = 50;

/// 報價計算配置
///
/// 先前散落在各畫面中的常數（折現率、現金流比例）在此集中為具名參數。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// 折現率（0.10 = 10%）
    pub discount_rate: Decimal,

    /// 年利潤中視為淨現金流的比例
    ///
    /// 業務上的折舊/稅務處理尚未釐清，因此以顯式參數提供，
    /// 預設 0.35 與既有畫面一致。
    pub recovery_fraction: Decimal,

    /// 投資回收分析年限
    pub horizon_years: u32,

    /// IRR 計算方式
    pub irr_method: IrrMethod,

    /// NRE 攤銷策略
    pub amortization: AmortizationStrategy,

    /// 是否要求 BOM 全數定價
    /// - true: 有未定價項目時直接回傳 IncompleteData 錯誤
    /// - false: 照算，但標記為不完整並附帶警告（預設）
    pub require_complete_bom: bool,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            discount_rate: Decimal::new(10, 2),
            recovery_fraction: Decimal::new(35, 2),
            horizon_years: 5,
            irr_method: IrrMethod::default(),
            amortization: AmortizationStrategy::default(),
            require_complete_bom: false,
        }
    }
}

impl QuoteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 讀取配置（缺少的欄位使用預設值）並驗證
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| QuoteError::config("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置折現率
    pub fn with_discount_rate(mut self, rate: Decimal) -> Self {
        self.discount_rate = rate;
        self
    }

    /// 建構器模式：設置現金流比例
    pub fn with_recovery_fraction(mut self, fraction: Decimal) -> Self {
        self.recovery_fraction = fraction;
        self
    }

    /// 建構器模式：設置分析年限
    pub fn with_horizon_years(mut self, years: u32) -> Self {
        self.horizon_years = years;
        self
    }

    /// 建構器模式：設置 IRR 計算方式
    pub fn with_irr_method(mut self, method: IrrMethod) -> Self {
        self.irr_method = method;
        self
    }

    /// 建構器模式：設置攤銷策略
    pub fn with_amortization(mut self, strategy: AmortizationStrategy) -> Self {
        self.amortization = strategy;
        self
    }

    /// 建構器模式：是否要求 BOM 完整
    pub fn with_require_complete_bom(mut self, require: bool) -> Self {
        self.require_complete_bom = require;
        self
    }

    /// 驗證參數範圍
    pub fn validate(&self) -> Result<()> {
        if self.discount_rate < Decimal::ZERO || self.discount_rate > Decimal::ONE {
            return Err(QuoteError::config("discount_rate", "必須介於 0 與 1 之間"));
        }
        if self.recovery_fraction < Decimal::ZERO || self.recovery_fraction > Decimal::ONE {
            return Err(QuoteError::config("recovery_fraction", "必須介於 0 與 1 之間"));
        }
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(QuoteError::config(
                "horizon_years",
                format!("必須介於 1 與 {} 之間", MAX_HORIZON_YEARS),
            ));
        }
        self.irr_method.validate()?;
        self.amortization.validate()
    }
}

/// IRR 計算方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IrrMethod {
    /// 二分法求 NPV = 0 的折現率
    Bisection {
        /// 折現率下界（需 > -1）
        lower: f64,
        /// 折現率上界
        upper: f64,
        /// NPV 收斂容差
        tolerance: f64,
        max_iterations: u32,
    },

    /// 簡化估算：年淨現金流 / 投資總額
    Approximation,
}

impl Default for IrrMethod {
    fn default() -> Self {
        Self::Bisection {
            lower: -0.99,
            upper: 10.0,
            tolerance: 1e-7,
            max_iterations: 200,
        }
    }
}

impl IrrMethod {
    fn validate(&self) -> Result<()> {
        if let Self::Bisection {
            lower,
            upper,
            tolerance,
            max_iterations,
        } = *self
        {
            if !(lower.is_finite() && upper.is_finite()) || lower <= -1.0 || lower >= upper {
                return Err(QuoteError::config("irr_method", "折現率區間需滿足 -1 < lower < upper"));
            }
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(QuoteError::config("irr_method", "tolerance 必須大於 0"));
            }
            if max_iterations == 0 {
                return Err(QuoteError::config("irr_method", "max_iterations 必須大於 0"));
            }
        }
        Ok(())
    }
}

/// 攤銷模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationMode {
    /// 分攤進單價（直線法）
    Amortized,
    /// 一次性支付，不進單價
    Upfront,
}

/// NRE 攤銷策略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmortizationStrategy {
    /// 攤銷模式
    pub mode: AmortizationMode,

    /// 資本年利率（單利），攤銷基數 = 投資 × (1 + 利率 × 年限)
    pub interest_rate: Decimal,
}

impl Default for AmortizationStrategy {
    fn default() -> Self {
        Self {
            mode: AmortizationMode::Amortized,
            interest_rate: Decimal::ZERO,
        }
    }
}

impl AmortizationStrategy {
    pub fn upfront() -> Self {
        Self {
            mode: AmortizationMode::Upfront,
            interest_rate: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置資本年利率
    pub fn with_interest_rate(mut self, rate: Decimal) -> Self {
        self.interest_rate = rate;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.interest_rate < Decimal::ZERO || self.interest_rate > Decimal::ONE {
            return Err(QuoteError::config("interest_rate", "必須介於 0 與 1 之間"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();

        assert_eq!(config.discount_rate, Decimal::new(10, 2));
        assert_eq!(config.recovery_fraction, Decimal::new(35, 2));
        assert_eq!(config.horizon_years, 5);
        assert_eq!(config.amortization.mode, AmortizationMode::Amortized);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = QuoteConfig::new()
            .with_discount_rate(Decimal::new(8, 2))
            .with_recovery_fraction(Decimal::new(5, 1))
            .with_horizon_years(7)
            .with_irr_method(IrrMethod::Approximation)
            .with_require_complete_bom(true);

        assert_eq!(config.discount_rate, Decimal::new(8, 2));
        assert_eq!(config.recovery_fraction, Decimal::new(5, 1));
        assert_eq!(config.horizon_years, 7);
        assert_eq!(config.irr_method, IrrMethod::Approximation);
        assert!(config.require_complete_bom);
    }

    #[test]
    fn test_discount_rate_out_of_bounds() {
        let config = QuoteConfig::new().with_discount_rate(Decimal::from(2));

        assert!(matches!(
            config.validate(),
            Err(QuoteError::Configuration { field: "discount_rate", .. })
        ));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let config = QuoteConfig::new().with_horizon_years(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_irr_bracket() {
        let config = QuoteConfig::new().with_irr_method(IrrMethod::Bisection {
            lower: 0.5,
            upper: 0.1,
            tolerance: 1e-7,
            max_iterations: 100,
        });

        assert!(matches!(
            config.validate(),
            Err(QuoteError::Configuration { field: "irr_method", .. })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = QuoteConfig::from_json_str(
            r#"{"discount_rate":"0.08","amortization":{"mode":"Upfront"}}"#,
        )
        .unwrap();

        assert_eq!(config.discount_rate, Decimal::new(8, 2));
        assert_eq!(config.recovery_fraction, Decimal::new(35, 2));
        assert_eq!(config.amortization.mode, AmortizationMode::Upfront);
        assert_eq!(config.amortization.interest_rate, Decimal::ZERO);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let result = QuoteConfig::from_json_str(r#"{"horizon_years":0}"#);
        assert!(matches!(
            result,
            Err(QuoteError::Configuration { field: "horizon_years", .. })
        ));
    }
}
