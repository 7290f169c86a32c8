//! 批量标准成本调整
//!
//! 过滤条件、调整规格与逐条结果累加器。单条记录失败只记入结果，不中断整批

use chrono::NaiveDate;
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ProductCost, validate_reason};
use crate::domain::enums::{AdjustmentKind, CostingMethod};
use crate::domain::value_objects::{CostComponents, ProductId};

/// 批量更新的产品过滤条件
///
/// 各条件之间为 AND，缺省的条件不做约束
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassUpdateFilter {
    pub category: Option<String>,
    pub costing_method: Option<CostingMethod>,
    /// 生效日期下界（含）
    pub effective_from: Option<NaiveDate>,
    /// 生效日期上界（含）
    pub effective_to: Option<NaiveDate>,
    /// 显式产品集合；给出空集合时不匹配任何产品
    pub product_ids: Option<Vec<ProductId>>,
}

impl MassUpdateFilter {
    pub fn validate(&self) -> AppResult<()> {
        if let (Some(from), Some(to)) = (self.effective_from, self.effective_to) {
            if from > to {
                return Err(AppError::validation(format!(
                    "Effective date range is inverted: {} > {}",
                    from, to
                )));
            }
        }
        if self.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(AppError::validation("Category filter must not be blank"));
        }
        Ok(())
    }

    pub fn has_date_range(&self) -> bool {
        self.effective_from.is_some() || self.effective_to.is_some()
    }

    /// 判断一条成本记录是否命中过滤条件
    ///
    /// 指定日期区间时，没有生效日期的记录不命中
    pub fn matches(&self, cost: &ProductCost) -> bool {
        if let Some(category) = &self.category {
            if cost.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(method) = self.costing_method {
            if cost.costing_method != method {
                return false;
            }
        }
        if self.has_date_range() {
            let Some(date) = cost.effective_date else {
                return false;
            };
            if self.effective_from.is_some_and(|from| date < from)
                || self.effective_to.is_some_and(|to| date > to)
            {
                return false;
            }
        }
        if let Some(ids) = &self.product_ids {
            if !ids.contains(&cost.product_id) {
                return false;
            }
        }
        true
    }
}

/// 统一调整规格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub material: Option<Decimal>,
    pub labor: Option<Decimal>,
    pub overhead: Option<Decimal>,
    pub reason: String,
}

impl Adjustment {
    pub fn validate(&self) -> AppResult<()> {
        if self.material.is_none() && self.labor.is_none() && self.overhead.is_none() {
            return Err(AppError::validation(
                "Adjustment must carry at least one component delta",
            ));
        }
        validate_reason(&self.reason)
    }

    /// 计算调整后的成本，结果按 `scale` 舍入
    ///
    /// 任一分量结果为负、达到存储上界或计算溢出时返回错误描述，由调用方记入逐条错误
    pub fn apply(&self, current: &CostComponents, scale: u32) -> Result<CostComponents, String> {
        let next = CostComponents::new(
            self.component("material", current.material, self.material)?,
            self.component("labor", current.labor, self.labor)?,
            self.component("overhead", current.overhead, self.overhead)?,
        )
        .round(scale);

        if let Some(name) = next.first_negative() {
            return Err(format!("Adjustment would make {} negative", name));
        }
        if let Some((name, _)) = next
            .named()
            .into_iter()
            .find(|(_, value)| *value >= CostComponents::LIMIT)
        {
            return Err(format!(
                "Adjustment would make {} reach {}",
                name,
                CostComponents::LIMIT
            ));
        }
        Ok(next)
    }

    fn component(
        &self,
        name: &str,
        current: Decimal,
        delta: Option<Decimal>,
    ) -> Result<Decimal, String> {
        let Some(delta) = delta else {
            return Ok(current);
        };

        let value = match self.kind {
            AdjustmentKind::Percentage => (delta / Decimal::ONE_HUNDRED)
                .checked_add(Decimal::ONE)
                .and_then(|factor| current.checked_mul(factor)),
            AdjustmentKind::Amount => current.checked_add(delta),
        };

        value.ok_or_else(|| format!("Arithmetic overflow adjusting {}", name))
    }
}

/// 单条记录的失败描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassUpdateError {
    pub product_id: ProductId,
    pub message: String,
}

/// 批量更新结果累加器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassUpdateResult {
    pub updated_count: u64,
    pub errors: Vec<MassUpdateError>,
    /// 截止时间到达后停止写入时为 false
    pub completed: bool,
    #[serde(skip)]
    pub updated_products: Vec<ProductId>,
}

impl MassUpdateResult {
    pub fn new() -> Self {
        Self {
            updated_count: 0,
            errors: Vec::new(),
            completed: true,
            updated_products: Vec::new(),
        }
    }

    pub fn record_success(&mut self, product_id: ProductId) {
        self.updated_count += 1;
        self.updated_products.push(product_id);
    }

    pub fn record_failure(&mut self, product_id: ProductId, message: impl Into<String>) {
        self.errors.push(MassUpdateError {
            product_id,
            message: message.into(),
        });
    }

    /// 标记为中途停止
    pub fn interrupt(&mut self) {
        self.completed = false;
    }
}

impl Default for MassUpdateResult {
    fn default() -> Self {
        Self::new()
    }
}
