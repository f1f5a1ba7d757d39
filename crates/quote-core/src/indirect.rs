//! 間接費用模型
//!
//! 專案層級共用，不屬於任何單一產品。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{QuoteError, Result};

/// 間接費用組（單件）
///
/// 反序列化時五個欄位皆為必填，缺任一欄位即失敗。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndirectCostSet {
    /// 製造費用
    pub manufacturing: Decimal,
    /// 品質費用
    pub quality: Decimal,
    /// 物流費用
    pub logistics: Decimal,
    /// 管理費用
    pub management: Decimal,
    /// 財務費用
    pub financial: Decimal,
}

impl IndirectCostSet {
    pub fn new(
        manufacturing: Decimal,
        quality: Decimal,
        logistics: Decimal,
        management: Decimal,
        financial: Decimal,
    ) -> Self {
        Self {
            manufacturing,
            quality,
            logistics,
            management,
            financial,
        }
    }

    /// 全為 0 的費用組
    pub fn zero() -> Self {
        Self::new(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }

    /// 具名的五個組成項
    pub fn components(&self) -> [(&'static str, Decimal); 5] {
        [
            ("manufacturing", self.manufacturing),
            ("quality", self.quality),
            ("logistics", self.logistics),
            ("management", self.management),
            ("financial", self.financial),
        ]
    }

    /// 檢查所有組成項非負
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.components() {
            if value < Decimal::ZERO {
                return Err(QuoteError::config(field, "間接費用不可為負"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_component_named() {
        let mut set = IndirectCostSet::zero();
        set.logistics = Decimal::from(-10);

        assert_eq!(
            set.validate(),
            Err(QuoteError::config("logistics", "間接費用不可為負"))
        );
    }

    #[test]
    fn test_missing_field_fails_to_deserialize() {
        let json = r#"{"manufacturing":"220.50","quality":"258.00","logistics":"150.00","management":"120.00"}"#;
        let parsed: std::result::Result<IndirectCostSet, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_complete_set_deserializes() {
        let json = r#"{"manufacturing":"220.50","quality":"258.00","logistics":"150.00","management":"120.00","financial":"80.00"}"#;
        let set: IndirectCostSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.financial, Decimal::from(80));
        assert!(set.validate().is_ok());
    }
}
