//! 上游輸入紀錄（已解析的 BOM/工藝/其他費用資料）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 物料紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// 物料編碼
    pub item_code: String,
    pub name: String,
    /// 用量
    pub quantity: Decimal,
    /// 計量單位
    pub unit: Option<String>,
    /// 標準單價（None = 待詢價）
    pub std_price: Option<Decimal>,
    /// VAVE 單價
    pub vave_price: Option<Decimal>,
    /// 物料分類
    pub category: Option<String>,
}

impl MaterialRecord {
    pub fn new(item_code: impl Into<String>, name: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            name: name.into(),
            quantity,
            unit: None,
            std_price: None,
            vave_price: None,
            category: None,
        }
    }

    /// 建構器模式：設置標準單價
    pub fn with_std_price(mut self, price: Decimal) -> Self {
        self.std_price = Some(price);
        self
    }

    /// 建構器模式：設置 VAVE 單價
    pub fn with_vave_price(mut self, price: Decimal) -> Self {
        self.vave_price = Some(price);
        self
    }

    /// 建構器模式：設置計量單位
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// 工藝費率（雙軌）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRate {
    /// 標準機時費率（MHR）
    pub std_mhr: Decimal,
    /// 標準人工費率
    pub std_labor: Decimal,
    /// VAVE 機時費率，缺省沿用標準
    pub vave_mhr: Option<Decimal>,
    /// VAVE 人工費率，缺省沿用標準
    pub vave_labor: Option<Decimal>,
    /// 效率係數（僅作用於 VAVE）
    pub efficiency_factor: Decimal,
}

impl ProcessRate {
    pub fn new(std_mhr: Decimal, std_labor: Decimal) -> Self {
        Self {
            std_mhr,
            std_labor,
            vave_mhr: None,
            vave_labor: None,
            efficiency_factor: Decimal::ONE,
        }
    }

    /// 建構器模式：設置 VAVE 費率
    pub fn with_vave(mut self, mhr: Decimal, labor: Decimal) -> Self {
        self.vave_mhr = Some(mhr);
        self.vave_labor = Some(labor);
        self
    }

    /// 建構器模式：設置效率係數
    pub fn with_efficiency_factor(mut self, factor: Decimal) -> Self {
        self.efficiency_factor = factor;
        self
    }

    /// 標準小時費率 = MHR + 人工
    pub fn std_hourly_rate(&self) -> Decimal {
        self.std_mhr + self.std_labor
    }

    /// VAVE 小時費率 = (MHR + 人工) × 效率係數
    pub fn vave_hourly_rate(&self) -> Decimal {
        let mhr = self.vave_mhr.unwrap_or(self.std_mhr);
        let labor = self.vave_labor.unwrap_or(self.std_labor);
        (mhr + labor) * self.efficiency_factor
    }
}

/// 工藝紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// 工藝代碼
    pub process_code: String,
    pub name: String,
    /// 循環時間（小時/件）
    pub cycle_time: Decimal,
    /// 費率（None = 尚未匹配費率）
    pub rate: Option<ProcessRate>,
    /// 工作中心
    pub work_center: Option<String>,
}

impl ProcessRecord {
    pub fn new(process_code: impl Into<String>, name: impl Into<String>, cycle_time: Decimal) -> Self {
        Self {
            process_code: process_code.into(),
            name: name.into(),
            cycle_time,
            rate: None,
            work_center: None,
        }
    }

    /// 建構器模式：設置費率
    pub fn with_rate(mut self, rate: ProcessRate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// 建構器模式：設置工作中心
    pub fn with_work_center(mut self, work_center: impl Into<String>) -> Self {
        self.work_center = Some(work_center.into());
        self
    }
}

/// 其他單件費用（包裝、運費…）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherCostRecord {
    pub id: String,
    pub description: String,
    /// 單件金額
    pub amount: Decimal,
}

impl OtherCostRecord {
    pub fn new(id: impl Into<String>, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
        }
    }
}
