//! 生產最佳化器（整數線性規劃）

use alba_core::{AlbaError, ProductionModelConfig, ProductionPlan, ResourceKind, ResourceLimits, Result};
use good_lp::{constraint, default_solver, variable, ProblemVariables, ResolutionError, Solution, SolverModel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::model::ProductionModel;

/// 求解器回傳值與最近整數的容許誤差
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// 生產最佳化器
///
/// 無狀態：相同輸入與求解器得到相同結果。
#[derive(Debug, Clone, Default)]
pub struct ProductionOptimizer {
    config: ProductionModelConfig,
}

impl ProductionOptimizer {
    /// 以自訂模型配置創建最佳化器
    pub fn new(config: ProductionModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProductionModelConfig {
        &self.config
    }

    /// 以浮點數上限求解（先驗證輸入）
    pub fn solve_limits(&self, fabric: f64, sewing_hours: f64, printing_hours: f64) -> Result<ProductionPlan> {
        let limits = ResourceLimits::new(fabric, sewing_hours, printing_hours)?;
        self.solve(&limits)
    }

    /// 主求解入口
    pub fn solve(&self, limits: &ResourceLimits) -> Result<ProductionPlan> {
        tracing::info!(
            "開始生產最佳化：布料 {}，縫製工時 {}，印刷工時 {}",
            limits.fabric,
            limits.sewing_hours,
            limits.printing_hours
        );

        let start_time = std::time::Instant::now();

        let model = ProductionModel::new(self.config.clone(), *limits)?;
        let (sporty_units, casual_units) = Self::solve_milp(&model)?;

        // 以精確十進位重新驗證，利潤由整數解重新計算
        let (usage, max_profit) = model.verify(sporty_units, casual_units)?;
        let plan = ProductionPlan::new(sporty_units, casual_units, max_profit, usage);

        tracing::info!("生產最佳化完成，耗時 {:?}：{}", start_time.elapsed(), plan);

        Ok(plan)
    }

    /// 組裝並求解整數規劃，回傳整數化後的數量
    fn solve_milp(model: &ProductionModel) -> Result<(u64, u64)> {
        let (sporty_bound, casual_bound) = model.upper_bounds();
        tracing::debug!("自然上界: 運動款 {}，休閒款 {}", sporty_bound, casual_bound);

        let mut vars = ProblemVariables::new();
        let sporty = vars.add(variable().integer().min(0).max(sporty_bound as f64));
        let casual = vars.add(variable().integer().min(0).max(casual_bound as f64));

        let objective = to_f64(model.sporty().unit_profit)? * sporty + to_f64(model.casual().unit_profit)? * casual;
        let mut problem = vars.maximise(objective).using(default_solver);

        for kind in ResourceKind::ALL {
            let sporty_rate = to_f64(model.sporty().consumption(kind))?;
            let casual_rate = to_f64(model.casual().consumption(kind))?;
            let limit = to_f64(model.limits().get(kind))?;

            tracing::debug!(
                "限制 {}: {} * x1 + {} * x2 <= {}",
                kind.label(),
                sporty_rate,
                casual_rate,
                limit
            );
            problem = problem.with(constraint!(sporty_rate * sporty + casual_rate * casual <= limit));
        }

        let solution = problem.solve().map_err(|e| match e {
            ResolutionError::Infeasible => AlbaError::Infeasible("求解器回報模型不可行".to_string()),
            other => AlbaError::SolverFailure(other.to_string()),
        })?;

        let sporty_units = to_units("sporty", solution.value(sporty))?;
        let casual_units = to_units("casual", solution.value(casual))?;

        tracing::debug!("求解器結果: x1 = {}，x2 = {}", sporty_units, casual_units);

        Ok((sporty_units, casual_units))
    }
}

fn to_f64(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| AlbaError::SolverFailure(format!("無法轉換為浮點數: {}", value)))
}

/// 將求解器的浮點值轉為非負整數；偏離整數或為負時視為求解器錯誤
fn to_units(name: &str, value: f64) -> Result<u64> {
    if !value.is_finite() {
        return Err(AlbaError::SolverFailure(format!("{} 的值不是有限值: {}", name, value)));
    }

    let rounded = value.round();
    if (value - rounded).abs() > INTEGRALITY_TOLERANCE {
        return Err(AlbaError::SolverFailure(format!("{} 的值不是整數: {}", name, value)));
    }
    if rounded < 0.0 || rounded >= u64::MAX as f64 {
        return Err(AlbaError::SolverFailure(format!("{} 的值超出範圍: {}", name, value)));
    }

    Ok(rounded as u64)
}
