//! 髒標記追蹤

use std::collections::HashSet;
use uuid::Uuid;

/// 髒標記追蹤器（以產品ID為鍵）
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_products: HashSet<Uuid>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記產品為髒
    pub fn mark_dirty(&mut self, product_id: Uuid) {
        self.dirty_products.insert(product_id);
    }

    /// 一次標記多個產品
    pub fn mark_all<I: IntoIterator<Item = Uuid>>(&mut self, product_ids: I) {
        self.dirty_products.extend(product_ids);
    }

    /// 檢查產品是否為髒
    pub fn is_dirty(&self, product_id: &Uuid) -> bool {
        self.dirty_products.contains(product_id)
    }

    /// 清除單一產品的髒標記
    pub fn clear_one(&mut self, product_id: &Uuid) -> bool {
        self.dirty_products.remove(product_id)
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_products.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_products.is_empty()
    }

    /// 獲取所有髒產品
    pub fn dirty_products(&self) -> Vec<Uuid> {
        self.dirty_products.iter().copied().collect()
    }
}
