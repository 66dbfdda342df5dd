//! # 配送網路最短路徑範例
//!
//! 在預設配送網路（Planta、Bodega、Cliente1~3）上，
//! 計算工廠到各客戶的最短路線。

use alba::{compute_routes, DistributionGraph, RouteOutcome};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("🚚 ===== 配送網路最短路徑範例 =====");
    println!();

    // ========== 1. 建立配送網路 ==========
    println!("🗺️  步驟 1: 建立配送網路");
    let graph = DistributionGraph::reference_network()?;
    println!("   ✓ 節點數: {}", graph.node_count());
    println!("   ✓ 邊數: {}", graph.edge_count());
    println!();

    // ========== 2. 計算最短路線 ==========
    println!("🧭 步驟 2: 計算 Planta 到各目的地的最短路線");
    let destinations = ["Cliente1", "Cliente2", "Cliente3", "Bodega"];
    let report = compute_routes("Planta", &destinations)?;
    println!();

    // ========== 3. 輸出結果 ==========
    println!("📋 步驟 3: 結果");
    for outcome in &report.outcomes {
        match &outcome.outcome {
            RouteOutcome::Route(route) => println!(
                "   {} -> {}：{}（成本 {}）",
                report.source,
                outcome.destination,
                route.path_nodes.join(" -> "),
                route.total_cost
            ),
            RouteOutcome::Unreachable => println!("   {}：無法抵達", outcome.destination),
            RouteOutcome::ServiceFailure(err) => println!("   {}：{}", outcome.destination, err),
        }
    }

    Ok(())
}
