//! # Alba
//!
//! Deportivos Alba 的決策支援核心：
//!
//! 1. 生產組合最佳化（整數線性規劃）
//! 2. 配送網路最短路徑（Dijkstra），含以外部地圖服務取得權重的即時模式
//!
//! 兩者互相獨立，皆為無狀態的純函式；介面層只負責收集輸入與呈現結果。
//!
//! ```no_run
//! let plan = alba::compute_production_plan(400.0, 300.0, 100.0)?;
//! println!("{}", plan);
//!
//! let report = alba::compute_routes("Planta", &["Cliente1", "Cliente3"])?;
//! for (destination, route) in report.routes() {
//!     println!("{} -> {:?} ({})", destination, route.path_nodes, route.total_cost);
//! }
//! # Ok::<(), alba::AlbaError>(())
//! ```

use std::sync::Arc;

pub use alba_core::*;
pub use alba_production::{ProductionModel, ProductionOptimizer};
pub use alba_routing::{
    Directions, DistributionGraph, LiveRoute, LiveRouter, LiveRoutingReport, MapsService, OfflineMapsService,
    ShortestPathCalculator,
};

/// 以預設模型計算最佳生產組合
///
/// 任一上限為負數或非有限值時回傳 `InvalidInput`，不會截斷。
pub fn compute_production_plan(fabric_limit: f64, sewing_limit: f64, printing_limit: f64) -> Result<ProductionPlan> {
    ProductionOptimizer::default().solve_limits(fabric_limit, sewing_limit, printing_limit)
}

/// 在預設配送網路上計算起點到各目的地的最短路線
pub fn compute_routes<S: AsRef<str>>(source_location: &str, destination_locations: &[S]) -> Result<RoutingReport> {
    let graph = DistributionGraph::reference_network()?;
    compute_routes_on(&graph, source_location, destination_locations)
}

/// 在指定配送網路上計算最短路線
pub fn compute_routes_on<S: AsRef<str>>(
    graph: &DistributionGraph,
    source_location: &str,
    destination_locations: &[S],
) -> Result<RoutingReport> {
    ShortestPathCalculator::shortest_paths(graph, source_location, destination_locations)
}

/// 以外部地圖服務計算即時路線
pub fn compute_live_routes<S: AsRef<str>>(
    service: Arc<dyn MapsService>,
    config: RoutingConfig,
    origin: &str,
    destination_locations: &[S],
) -> Result<LiveRoutingReport> {
    LiveRouter::new(service, config)?.compute(origin, destination_locations)
}

/// 將多行文字拆成目的地清單（每行一個，忽略空白行）
pub fn parse_destination_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_destination_lines() {
        let text = "Éxito Calle 80\n\n  Éxito Av 68  \r\nÉxito Suba\n";

        assert_eq!(
            parse_destination_lines(text),
            vec!["Éxito Calle 80".to_string(), "Éxito Av 68".to_string(), "Éxito Suba".to_string()]
        );
        assert!(parse_destination_lines("  \n\n").is_empty());
    }
}
