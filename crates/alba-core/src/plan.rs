//! 生產計劃模型（最佳化結果）

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resources::{ResourceLimits, ResourceUsage};

/// 最佳生產組合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionPlan {
    /// 運動款數量
    pub sporty_units: u64,

    /// 休閒款數量
    pub casual_units: u64,

    /// 最大利潤
    pub max_profit: Decimal,

    /// 資源耗用
    pub usage: ResourceUsage,
}

impl ProductionPlan {
    /// 創建新的生產計劃
    pub fn new(sporty_units: u64, casual_units: u64, max_profit: Decimal, usage: ResourceUsage) -> Self {
        Self {
            sporty_units,
            casual_units,
            max_profit,
            usage,
        }
    }

    /// 總生產數量
    pub fn total_units(&self) -> u64 {
        self.sporty_units + self.casual_units
    }

    /// 各資源剩餘量
    pub fn slack(&self, limits: &ResourceLimits) -> ResourceUsage {
        self.usage.slack(limits)
    }

    /// 是否在資源上限內
    pub fn is_within(&self, limits: &ResourceLimits) -> bool {
        self.usage.exceeded(limits).is_none()
    }
}

impl fmt::Display for ProductionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sporty: {}, casual: {}, max profit: {}",
            self.sporty_units,
            self.casual_units,
            format_currency(self.max_profit)
        )
    }
}

/// 以千分位格式化金額（四捨五入至整數），例如 `$3,250,000`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
