//! 标准成本构成（材料 / 人工 / 制造费用）

use cuba_domain_core::round_amount;
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 标准成本构成
///
/// 金额使用租户本位币。作为存量成本时各分量非负；作为差额时可以为负
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostComponents {
    pub material: Decimal,
    pub labor: Decimal,
    pub overhead: Decimal,
}

impl CostComponents {
    /// 单个分量的上界（不含），与存储列 NUMERIC(19, 6) 的整数位一致
    pub const LIMIT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);

    pub fn new(material: Decimal, labor: Decimal, overhead: Decimal) -> Self {
        Self {
            material,
            labor,
            overhead,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total(&self) -> AppResult<Decimal> {
        self.material
            .checked_add(self.labor)
            .and_then(|sum| sum.checked_add(self.overhead))
            .ok_or_else(|| AppError::validation("Cost total is out of range"))
    }

    /// 第一个为负的分量名称
    pub fn first_negative(&self) -> Option<&'static str> {
        self.named()
            .into_iter()
            .find(|(_, value)| value.is_sign_negative() && !value.is_zero())
            .map(|(name, _)| name)
    }

    /// 存量成本校验：各分量不得为负，且小于 LIMIT
    pub fn ensure_storable(&self) -> AppResult<()> {
        if let Some(name) = self.first_negative() {
            return Err(AppError::validation(format!(
                "Cost component {} must not be negative",
                name
            )));
        }
        if let Some((name, _)) = self.named().into_iter().find(|(_, v)| *v >= Self::LIMIT) {
            return Err(AppError::validation(format!(
                "Cost component {} must be less than {}",
                name,
                Self::LIMIT
            )));
        }
        Ok(())
    }

    /// 各分量按小数位舍入（中点远离零）
    pub fn round(&self, scale: u32) -> Self {
        Self {
            material: round_amount(self.material, scale),
            labor: round_amount(self.labor, scale),
            overhead: round_amount(self.overhead, scale),
        }
    }

    /// 相对于 `before` 的差额
    pub fn delta_from(&self, before: &CostComponents) -> AppResult<CostComponents> {
        let sub = |after: Decimal, before: Decimal, name: &str| {
            after
                .checked_sub(before)
                .ok_or_else(|| AppError::validation(format!("Cost delta for {} is out of range", name)))
        };
        Ok(Self {
            material: sub(self.material, before.material, "material")?,
            labor: sub(self.labor, before.labor, "labor")?,
            overhead: sub(self.overhead, before.overhead, "overhead")?,
        })
    }

    pub fn named(&self) -> [(&'static str, Decimal); 3] {
        [
            ("material", self.material),
            ("labor", self.labor),
            ("overhead", self.overhead),
        ]
    }
}
