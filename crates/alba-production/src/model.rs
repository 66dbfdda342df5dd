//! 生產模型（求解前一次組裝完成的不可變問題描述）

use alba_core::{AlbaError, ProductSpec, ProductionModelConfig, ResourceKind, ResourceLimits, ResourceUsage, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 單一產品可生產數量的上限（整數求解器以 32 位元整數處理變數界限）
///
/// 任一產品的自然上界超過此值時，資源上限視為無效輸入。
pub const MAX_UNITS: u64 = i32::MAX as u64;

/// 兩種產品在三種資源限制下的整數規劃模型
///
/// 目標：最大化 `利潤_運動 * x1 + 利潤_休閒 * x2`，
/// 限制：每種資源 `耗用_運動 * x1 + 耗用_休閒 * x2 <= 上限`，`x1, x2 >= 0` 且為整數。
#[derive(Debug, Clone)]
pub struct ProductionModel {
    config: ProductionModelConfig,
    limits: ResourceLimits,
}

impl ProductionModel {
    /// 組裝模型；配置或資源上限無效時回傳錯誤
    pub fn new(config: ProductionModelConfig, limits: ResourceLimits) -> Result<Self> {
        config.validate()?;
        limits.validate()?;

        let model = Self { config, limits };
        let (sporty_bound, casual_bound) = model.upper_bounds();
        for (product, bound) in [(model.sporty(), sporty_bound), (model.casual(), casual_bound)] {
            if bound > MAX_UNITS {
                return Err(AlbaError::InvalidInput(format!(
                    "資源上限過大：{} 最多可生產 {} 件，超過上限 {}",
                    product.name, bound, MAX_UNITS
                )));
            }
        }
        Ok(model)
    }

    pub fn config(&self) -> &ProductionModelConfig {
        &self.config
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn sporty(&self) -> &ProductSpec {
        &self.config.sporty
    }

    pub fn casual(&self) -> &ProductSpec {
        &self.config.casual
    }

    /// 各產品單獨生產時的自然上界
    pub fn upper_bounds(&self) -> (u64, u64) {
        (
            Self::upper_bound(self.sporty(), &self.limits),
            Self::upper_bound(self.casual(), &self.limits),
        )
    }

    fn upper_bound(product: &ProductSpec, limits: &ResourceLimits) -> u64 {
        ResourceKind::ALL
            .iter()
            .filter(|kind| product.consumption(**kind) > Decimal::ZERO)
            .map(|kind| {
                limits
                    .get(*kind)
                    .checked_div(product.consumption(*kind))
                    .and_then(|units| units.floor().to_u64())
                    .unwrap_or(u64::MAX)
            })
            .min()
            .unwrap_or(u64::MAX)
    }

    /// 計算資源耗用（溢位時回傳 None）
    pub fn usage(&self, sporty_units: u64, casual_units: u64) -> Option<ResourceUsage> {
        let consumed = |kind: ResourceKind| {
            weighted_sum(
                self.sporty().consumption(kind),
                sporty_units,
                self.casual().consumption(kind),
                casual_units,
            )
        };

        Some(ResourceUsage {
            fabric: consumed(ResourceKind::Fabric)?,
            sewing_hours: consumed(ResourceKind::Sewing)?,
            printing_hours: consumed(ResourceKind::Printing)?,
        })
    }

    /// 計算利潤（溢位時回傳 None）
    pub fn profit(&self, sporty_units: u64, casual_units: u64) -> Option<Decimal> {
        weighted_sum(
            self.sporty().unit_profit,
            sporty_units,
            self.casual().unit_profit,
            casual_units,
        )
    }

    /// 以精確十進位檢查是否滿足所有限制
    pub fn is_feasible(&self, sporty_units: u64, casual_units: u64) -> bool {
        self.usage(sporty_units, casual_units)
            .map(|usage| usage.exceeded(&self.limits).is_none())
            .unwrap_or(false)
    }

    /// 檢查求解結果並回傳其資源耗用與利潤
    pub fn verify(&self, sporty_units: u64, casual_units: u64) -> Result<(ResourceUsage, Decimal)> {
        let usage = self.usage(sporty_units, casual_units).ok_or_else(|| {
            AlbaError::SolverFailure(format!("解 ({}, {}) 的資源耗用溢位", sporty_units, casual_units))
        })?;

        if let Some(kind) = usage.exceeded(&self.limits) {
            return Err(AlbaError::SolverFailure(format!(
                "解 ({}, {}) 超出 {} 上限: {} > {}",
                sporty_units,
                casual_units,
                kind.label(),
                usage.get(kind),
                self.limits.get(kind)
            )));
        }

        let profit = self.profit(sporty_units, casual_units).ok_or_else(|| {
            AlbaError::SolverFailure(format!("解 ({}, {}) 的利潤溢位", sporty_units, casual_units))
        })?;

        Ok((usage, profit))
    }
}

fn weighted_sum(a: Decimal, x: u64, b: Decimal, y: u64) -> Option<Decimal> {
    let first = a.checked_mul(Decimal::from(x))?;
    let second = b.checked_mul(Decimal::from(y))?;
    first.checked_add(second)
}
