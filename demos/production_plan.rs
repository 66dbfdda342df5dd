//! # 生產組合最佳化範例
//!
//! 以三項資源上限計算運動款與休閒款的最佳產量。
//! 可選擇傳入 JSON 設定檔路徑以覆寫產品參數：
//!
//! ```text
//! cargo run --example production_plan -- 400 300 100 [config.json]
//! ```

use std::path::Path;

use alba::{AppConfig, ProductionOptimizer, ResourceKind, ResourceLimits};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("👕 ===== Deportivos Alba 生產組合範例 =====");
    println!();

    // ========== 1. 讀取資源上限 ==========
    println!("📦 步驟 1: 讀取資源上限");
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value = |idx: usize, default: f64| -> anyhow::Result<f64> {
        match args.get(idx) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(default),
        }
    };
    let limits = ResourceLimits::new(value(0, 400.0)?, value(1, 300.0)?, value(2, 100.0)?)?;
    for kind in ResourceKind::ALL {
        println!("   {}: {}", kind.label(), limits.get(kind));
    }
    println!();

    // ========== 2. 載入產品參數 ==========
    println!("⚙️  步驟 2: 載入產品參數");
    let config = match args.get(3) {
        Some(path) => {
            println!("   ✓ 從設定檔載入：{}", path);
            AppConfig::from_json_file(Path::new(path))?
        }
        None => {
            println!("   ✓ 使用預設產品參數");
            AppConfig::default()
        }
    };
    for spec in [&config.production.sporty, &config.production.casual] {
        println!(
            "   {}: 利潤 {}, 布料 {}, 縫製 {}, 印刷 {}",
            spec.name, spec.unit_profit, spec.fabric_per_unit, spec.sewing_hours_per_unit, spec.printing_hours_per_unit
        );
    }
    println!();

    // ========== 3. 求解 ==========
    println!("🧮 步驟 3: 求解整數線性規劃");
    let optimizer = ProductionOptimizer::new(config.production)?;
    let plan = optimizer.solve(&limits)?;
    println!("   ✓ {}", plan);
    println!();

    // ========== 4. 資源使用 ==========
    println!("📊 步驟 4: 資源使用情形");
    let slack = plan.slack(&limits);
    for kind in ResourceKind::ALL {
        println!(
            "   {}: 使用 {} / {}（剩餘 {}）",
            kind.label(),
            plan.usage.get(kind),
            limits.get(kind),
            slack.get(kind)
        );
    }

    Ok(())
}
