//! 間接費用分攤
//!
//! 專案共用的間接費用組，以固定單件加項計入每個產品。

use quote_core::{try_sum, IndirectCostSet, Result};
use rust_decimal::Decimal;

/// 間接費用分攤器
pub struct IndirectCostAllocator;

impl IndirectCostAllocator {
    /// 驗證後加總五個組成項
    pub fn allocate(set: &IndirectCostSet) -> Result<Decimal> {
        set.validate()?;
        try_sum(set.components().iter().map(|(_, value)| *value), "indirect_cost")
    }
}
