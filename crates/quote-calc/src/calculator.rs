//! 報價主計算器

use quote_core::{
    try_sum, AmortizationMode, IndirectCostSet, InvestmentItem, LineItem, MaterialRecord,
    OtherCostRecord, PricingInput, ProcessRecord, Product, QuoteConfig, Result,
};
use rust_decimal::Decimal;

use crate::{
    AmortizationScheduler, BomAggregator, CostItemNormalizer, IndirectCostAllocator,
    PricingCalculator, QuoteCostComposer, QuoteResult, QuoteWarning, RecoveryAnalyzer,
    RecoveryInput, WarningKind, WarningSubject,
};

/// 單一產品的報價輸入
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteInput {
    pub product: Product,

    /// 直接成本明細（物料/工藝/其他）
    pub line_items: Vec<LineItem>,

    /// 產品專屬的投資項
    pub investments: Vec<InvestmentItem>,
}

impl QuoteInput {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            line_items: Vec::new(),
            investments: Vec::new(),
        }
    }

    /// 由上游紀錄建立，並經正規化
    pub fn from_records(
        product: Product,
        materials: &[MaterialRecord],
        processes: &[ProcessRecord],
        others: &[OtherCostRecord],
        investments: Vec<InvestmentItem>,
    ) -> Result<Self> {
        Ok(Self {
            product,
            line_items: CostItemNormalizer::normalize(materials, processes, others)?,
            investments,
        })
    }

    /// 建構器模式：設置明細行
    pub fn with_line_items(mut self, items: Vec<LineItem>) -> Self {
        self.line_items = items;
        self
    }

    /// 建構器模式：設置投資項
    pub fn with_investments(mut self, investments: Vec<InvestmentItem>) -> Self {
        self.investments = investments;
        self
    }
}

/// 使用者可調參數（每次重算時提供）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteParameters {
    /// 定價驅動值（單價或利潤率）
    pub pricing: PricingInput,

    /// 攤銷年限選擇器，Some 時套用到產品全部投資項
    pub amortization_years: Option<u32>,
}

impl Default for QuoteParameters {
    fn default() -> Self {
        Self::margin(Decimal::from(15))
    }
}

impl QuoteParameters {
    /// 以利潤率驅動
    pub fn margin(percent: Decimal) -> Self {
        Self {
            pricing: PricingInput::MarginPercent(percent),
            amortization_years: None,
        }
    }

    /// 以單價驅動
    pub fn price(unit_price: Decimal) -> Self {
        Self {
            pricing: PricingInput::UnitPrice(unit_price),
            amortization_years: None,
        }
    }

    /// 建構器模式：設置攤銷年限
    pub fn with_amortization_years(mut self, years: u32) -> Self {
        self.amortization_years = Some(years);
        self
    }
}

/// 報價計算器
///
/// 不保存任何中間結果；每次呼叫都從輸入完整重算。
#[derive(Debug, Clone, Default)]
pub struct QuoteCalculator {
    config: QuoteConfig,
}

impl QuoteCalculator {
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// 主計算入口
    pub fn calculate(
        &self,
        input: &QuoteInput,
        indirect: &IndirectCostSet,
        params: &QuoteParameters,
    ) -> Result<QuoteResult> {
        let product = &input.product;
        tracing::info!(
            "開始報價計算：產品 {}，明細 {} 筆，投資 {} 筆",
            product.part_number,
            input.line_items.len(),
            input.investments.len()
        );
        let start_time = std::time::Instant::now();

        // 參數驗證放在所有除法之前
        self.config.validate()?;
        product.annual_volume_checked()?;

        // Step 1: BOM 直接成本
        tracing::debug!("Step 1: BOM 彙總");
        let bom = BomAggregator::aggregate(&input.line_items)?;
        if self.config.require_complete_bom {
            bom.ensure_complete()?;
        }

        // Step 2: NRE 攤銷
        tracing::debug!("Step 2: 投資攤銷");
        let amortizations = AmortizationScheduler::schedule_all(
            &input.investments,
            product,
            &self.config.amortization,
            params.amortization_years,
        )?;

        // Step 3: 間接費用
        tracing::debug!("Step 3: 間接費用");
        let indirect_total = IndirectCostAllocator::allocate(indirect)?;

        // Step 4: QS 成本
        tracing::debug!("Step 4: QS 成本組合");
        let breakdown = QuoteCostComposer::compose(&bom, indirect_total, &amortizations)?;

        // Step 5: 定價
        tracing::debug!("Step 5: 定價");
        let pricing =
            PricingCalculator::evaluate(breakdown.total_unit_cost, params.pricing, product)?;

        // Step 6: 投資回收（一次性支付的投資不需回收）
        tracing::debug!("Step 6: 投資回收分析");
        let recoverable = try_sum(
            amortizations
                .iter()
                .filter(|a| a.mode == AmortizationMode::Amortized)
                .map(|a| a.total_investment),
            "recoverable_investment",
        )?;

        let financials = if recoverable > Decimal::ZERO {
            Some(RecoveryAnalyzer::analyze(
                RecoveryInput::new(recoverable, pricing.annual_profit),
                &self.config,
            )?)
        } else {
            None
        };

        let mut result = QuoteResult {
            product_id: product.id,
            bom,
            amortizations,
            breakdown,
            pricing,
            financials,
            warnings: Vec::new(),
        };
        for warning in Self::collect_warnings(&result, &product.part_number) {
            result.add_warning(warning);
        }

        tracing::info!("報價計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "QS 成本 {}，單價 {}",
            result.breakdown.total_unit_cost,
            result.pricing.unit_price
        );

        Ok(result)
    }

    /// 彙整結果中需要提示使用者的狀態
    fn collect_warnings(result: &QuoteResult, part_number: &str) -> Vec<QuoteWarning> {
        let product = || WarningSubject::Product(part_number.to_string());
        let mut warnings: Vec<QuoteWarning> = result
            .bom
            .unpriced_items
            .iter()
            .map(|item_id| {
                QuoteWarning::new(
                    WarningSubject::LineItem(item_id.clone()),
                    WarningKind::UnpricedItem,
                    format!("{} 缺少單價，未計入直接成本", item_id),
                )
            })
            .collect();

        if !result.bom.is_complete {
            warnings.push(QuoteWarning::new(
                product(),
                WarningKind::IncompleteBom,
                format!(
                    "{} 筆項目缺少單價，成本不完整: {:?}",
                    result.bom.unpriced_count, result.bom.unpriced_items
                ),
            ));
        }

        match &result.financials {
            None => warnings.push(QuoteWarning::new(
                product(),
                WarningKind::NoRecoverableInvestment,
                "沒有需攤銷的投資，略過投資回收分析",
            )),
            Some(metrics) => {
                if metrics.payback_period_years.is_unreachable() {
                    warnings.push(QuoteWarning::new(
                        product(),
                        WarningKind::UnrecoverableInvestment,
                        format!("年利潤 {} 不大於 0，投資無法回收", metrics.annual_profit),
                    ));
                }
                if metrics.irr_percent.is_none() {
                    warnings.push(QuoteWarning::new(
                        product(),
                        WarningKind::IrrUndetermined,
                        "IRR 在設定的折現率區間內無解或未收斂",
                    ));
                }
            }
        }

        warnings
    }
}

/// 便捷函數：以指定配置完成一次報價計算
pub fn compute_quote(
    input: &QuoteInput,
    indirect: &IndirectCostSet,
    params: &QuoteParameters,
    config: &QuoteConfig,
) -> Result<QuoteResult> {
    QuoteCalculator::new(config.clone()).calculate(input, indirect, params)
}
