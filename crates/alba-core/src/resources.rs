//! 資源限制與耗用模型

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AlbaError, Result};

/// 資源種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// 布料（公尺）
    Fabric,
    /// 縫製工時
    Sewing,
    /// 印刷工時
    Printing,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Fabric, ResourceKind::Sewing, ResourceKind::Printing];

    /// 顯示名稱
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Fabric => "fabric",
            ResourceKind::Sewing => "sewing hours",
            ResourceKind::Printing => "printing hours",
        }
    }
}

/// 每次請求提供的資源上限（不持久化）
///
/// 反序列化時同樣檢查不可為負數。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResourceLimits")]
pub struct ResourceLimits {
    /// 可用布料
    pub fabric: Decimal,

    /// 可用縫製工時
    pub sewing_hours: Decimal,

    /// 可用印刷工時
    pub printing_hours: Decimal,
}

impl ResourceLimits {
    /// 由呼叫端的浮點數輸入建立，拒絕負數與非有限值（不做截斷）
    pub fn new(fabric: f64, sewing_hours: f64, printing_hours: f64) -> Result<Self> {
        Ok(Self {
            fabric: Self::convert(ResourceKind::Fabric, fabric)?,
            sewing_hours: Self::convert(ResourceKind::Sewing, sewing_hours)?,
            printing_hours: Self::convert(ResourceKind::Printing, printing_hours)?,
        })
    }

    /// 由 Decimal 建立
    pub fn from_decimals(fabric: Decimal, sewing_hours: Decimal, printing_hours: Decimal) -> Result<Self> {
        let limits = Self {
            fabric,
            sewing_hours,
            printing_hours,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// 檢查所有上限皆不為負數（欄位可直接建構，求解前需再次檢查）
    pub fn validate(&self) -> Result<()> {
        for kind in ResourceKind::ALL {
            if self.get(kind) < Decimal::ZERO {
                return Err(AlbaError::InvalidInput(format!(
                    "{} 不可為負數: {}",
                    kind.label(),
                    self.get(kind)
                )));
            }
        }
        Ok(())
    }

    /// 全部為零的資源上限
    pub fn zero() -> Self {
        Self {
            fabric: Decimal::ZERO,
            sewing_hours: Decimal::ZERO,
            printing_hours: Decimal::ZERO,
        }
    }

    /// 取得指定資源的上限
    pub fn get(&self, kind: ResourceKind) -> Decimal {
        match kind {
            ResourceKind::Fabric => self.fabric,
            ResourceKind::Sewing => self.sewing_hours,
            ResourceKind::Printing => self.printing_hours,
        }
    }

    fn convert(kind: ResourceKind, value: f64) -> Result<Decimal> {
        if !value.is_finite() {
            return Err(AlbaError::InvalidInput(format!("{} 必須是有限值: {}", kind.label(), value)));
        }
        if value < 0.0 {
            return Err(AlbaError::InvalidInput(format!("{} 不可為負數: {}", kind.label(), value)));
        }
        Decimal::from_f64(value)
            .ok_or_else(|| AlbaError::InvalidInput(format!("{} 超出可表示範圍: {}", kind.label(), value)))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResourceLimits {
    fabric: Decimal,
    sewing_hours: Decimal,
    printing_hours: Decimal,
}

impl TryFrom<RawResourceLimits> for ResourceLimits {
    type Error = AlbaError;

    fn try_from(raw: RawResourceLimits) -> Result<Self> {
        Self::from_decimals(raw.fabric, raw.sewing_hours, raw.printing_hours)
    }
}

/// 生產計劃實際耗用的資源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub fabric: Decimal,
    pub sewing_hours: Decimal,
    pub printing_hours: Decimal,
}

impl ResourceUsage {
    /// 取得指定資源的耗用量
    pub fn get(&self, kind: ResourceKind) -> Decimal {
        match kind {
            ResourceKind::Fabric => self.fabric,
            ResourceKind::Sewing => self.sewing_hours,
            ResourceKind::Printing => self.printing_hours,
        }
    }

    /// 第一個超出上限的資源（若全部符合則為 None）
    pub fn exceeded(&self, limits: &ResourceLimits) -> Option<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| self.get(*kind) > limits.get(*kind))
    }

    /// 各資源的剩餘量（上限 - 耗用）
    pub fn slack(&self, limits: &ResourceLimits) -> ResourceUsage {
        ResourceUsage {
            fabric: limits.fabric - self.fabric,
            sewing_hours: limits.sewing_hours - self.sewing_hours,
            printing_hours: limits.printing_hours - self.printing_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_limits() {
        let limits = ResourceLimits::new(400.0, 300.0, 100.5).unwrap();

        assert_eq!(limits.fabric, Decimal::from(400));
        assert_eq!(limits.sewing_hours, Decimal::from(300));
        assert_eq!(limits.printing_hours, Decimal::new(1005, 1));
    }

    #[rstest]
    #[case(-1.0, 0.0, 0.0)]
    #[case(0.0, -0.5, 0.0)]
    #[case(0.0, 0.0, -100.0)]
    #[case(f64::NAN, 0.0, 0.0)]
    #[case(0.0, f64::INFINITY, 0.0)]
    #[case(0.0, 0.0, f64::NEG_INFINITY)]
    #[case(1e30, 0.0, 0.0)]
    fn test_reject_invalid_limits(#[case] fabric: f64, #[case] sewing: f64, #[case] printing: f64) {
        let result = ResourceLimits::new(fabric, sewing, printing);
        assert!(matches!(result, Err(AlbaError::InvalidInput(_))));
    }

    #[test]
    fn test_from_decimals_rejects_negative() {
        let result = ResourceLimits::from_decimals(Decimal::ONE, Decimal::NEGATIVE_ONE, Decimal::ONE);
        assert!(matches!(result, Err(AlbaError::InvalidInput(_))));
    }

    #[test]
    fn test_deserialize_validates_limits() {
        let limits: ResourceLimits =
            serde_json::from_str(r#"{"fabric":"400","sewing_hours":300,"printing_hours":"100.5"}"#).unwrap();
        assert_eq!(limits.printing_hours, Decimal::new(1005, 1));

        let negative = serde_json::from_str::<ResourceLimits>(r#"{"fabric":"-5","sewing_hours":300,"printing_hours":100}"#);
        assert!(negative.is_err());

        let missing = serde_json::from_str::<ResourceLimits>(r#"{"fabric":"5","sewing_hours":300}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_validate_literal_limits() {
        let limits = ResourceLimits {
            fabric: Decimal::NEGATIVE_ONE,
            ..ResourceLimits::zero()
        };
        assert!(matches!(limits.validate(), Err(AlbaError::InvalidInput(_))));
        assert!(ResourceLimits::zero().validate().is_ok());
    }

    #[test]
    fn test_usage_slack_and_exceeded() {
        let limits = ResourceLimits::new(400.0, 300.0, 100.0).unwrap();
        let usage = ResourceUsage {
            fabric: Decimal::from(400),
            sewing_hours: Decimal::from(300),
            printing_hours: Decimal::from(100),
        };

        assert_eq!(usage.exceeded(&limits), None);
        assert_eq!(usage.slack(&limits), ResourceUsage::default());

        let over = ResourceUsage {
            sewing_hours: Decimal::new(3005, 1),
            ..usage
        };
        assert_eq!(over.exceeded(&limits), Some(ResourceKind::Sewing));
    }
}
