//! 成本明細行模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::try_mul;
use crate::{QuoteError, Result};

/// 成本項目類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostItemKind {
    /// 物料
    Material,
    /// 工藝
    Process,
    /// 投資（模具、檢具、設備…）
    Investment,
    /// 其他單件直接費用（包裝、運費…）
    Other,
}

impl CostItemKind {
    /// 是否計入直接成本
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Material | Self::Process | Self::Other)
    }
}

/// 成本明細行（正規化後的統一形狀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// 項目編號（物料編碼/工藝代碼）
    pub id: String,

    /// 項目類型
    pub kind: CostItemKind,

    /// 名稱
    pub name: String,

    /// 用量（物料數量或工時）
    pub quantity: Decimal,

    /// 計量單位
    pub unit: Option<String>,

    /// 標準單價；None 表示尚未詢價
    pub unit_price: Option<Decimal>,

    /// VAVE 單價；None 時沿用標準單價
    pub vave_unit_price: Option<Decimal>,

    /// 分類
    pub category: String,
}

impl LineItem {
    /// 創建新的明細行（未定價）
    pub fn new(id: impl Into<String>, kind: CostItemKind, quantity: Decimal) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            quantity,
            unit: None,
            unit_price: None,
            vave_unit_price: None,
            category: String::new(),
        }
    }

    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置計量單位
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// 建構器模式：設置標準單價
    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// 建構器模式：設置 VAVE 單價
    pub fn with_vave_unit_price(mut self, price: Decimal) -> Self {
        self.vave_unit_price = Some(price);
        self
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// 是否已定價
    pub fn is_priced(&self) -> bool {
        self.unit_price.is_some()
    }

    /// 標準成本 = 用量 × 單價（未定價時為 Ok(None)）
    pub fn extended_cost(&self) -> Result<Option<Decimal>> {
        self.unit_price
            .map(|price| self.multiply(price))
            .transpose()
    }

    /// VAVE 成本，缺 VAVE 單價時沿用標準單價
    pub fn vave_extended_cost(&self) -> Result<Option<Decimal>> {
        self.vave_unit_price
            .or(self.unit_price)
            .map(|price| self.multiply(price))
            .transpose()
    }

    fn multiply(&self, price: Decimal) -> Result<Decimal> {
        try_mul(self.quantity, price, &format!("{} extended_cost", self.id))
    }

    /// 檢查用量與單價皆非負
    pub fn validate(&self) -> Result<()> {
        if self.quantity < Decimal::ZERO {
            return Err(QuoteError::invalid_item(&self.id, "quantity 不可為負"));
        }
        if matches!(self.unit_price, Some(p) if p < Decimal::ZERO) {
            return Err(QuoteError::invalid_item(&self.id, "unit_price 不可為負"));
        }
        if matches!(self.vave_unit_price, Some(p) if p < Decimal::ZERO) {
            return Err(QuoteError::invalid_item(&self.id, "vave_unit_price 不可為負"));
        }
        Ok(())
    }
}
