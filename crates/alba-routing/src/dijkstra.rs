//! 單源最短路徑（Dijkstra）

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use alba_core::{AlbaError, Result, RouteOutcome, RoutePlan, RoutingReport};
use rust_decimal::Decimal;

use crate::graph::DistributionGraph;

/// 單源搜尋結果：最短距離與前驅節點
#[derive(Debug, Clone)]
pub struct SearchTree {
    source: usize,
    distances: Vec<Option<Decimal>>,
    predecessors: Vec<Option<usize>>,
}

impl SearchTree {
    /// 到指定節點的最短距離（不可達為 None）
    pub fn distance(&self, target: usize) -> Option<Decimal> {
        self.distances.get(target).copied().flatten()
    }

    /// 沿前驅鏈反向重建路徑
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessors[current]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// 最短路徑計算器
pub struct ShortestPathCalculator;

impl ShortestPathCalculator {
    /// 從起點計算到每個目的地的最短路線
    ///
    /// 起點或目的地不在圖中時回傳 `UnknownLocation`；
    /// 沒有路徑的目的地標記為 `Unreachable`，不影響其他目的地。
    pub fn shortest_paths<S: AsRef<str>>(
        graph: &DistributionGraph,
        source: &str,
        destinations: &[S],
    ) -> Result<RoutingReport> {
        if destinations.is_empty() {
            return Err(AlbaError::InvalidInput("目的地清單不可為空".to_string()));
        }

        let source_idx = graph
            .node_index(source)
            .ok_or_else(|| AlbaError::UnknownLocation(source.to_string()))?;

        let mut targets = Vec::with_capacity(destinations.len());
        for destination in destinations {
            let name = destination.as_ref();
            let idx = graph
                .node_index(name)
                .ok_or_else(|| AlbaError::UnknownLocation(name.to_string()))?;
            targets.push((name, idx));
        }

        tracing::info!("開始最短路徑計算：起點 {}，目的地 {} 個", source, targets.len());
        let start_time = std::time::Instant::now();

        let target_set: HashSet<usize> = targets.iter().map(|(_, idx)| *idx).collect();
        let tree = Self::search(graph, source_idx, &target_set)?;

        let mut report = RoutingReport::new(source.to_string());
        for (name, idx) in targets {
            let outcome = match Self::route_plan(graph, &tree, idx) {
                Some(route) => {
                    tracing::debug!("{} -> {}: 成本 {}，路徑 {:?}", source, name, route.total_cost, route.path_nodes);
                    RouteOutcome::Route(route)
                }
                None => {
                    tracing::debug!("{} -> {}: 不可達", source, name);
                    RouteOutcome::Unreachable
                }
            };
            report.push(name.to_string(), outcome);
        }

        tracing::info!(
            "最短路徑計算完成，耗時 {:?}，不可達 {} 個",
            start_time.elapsed(),
            report.failure_count()
        );

        Ok(report)
    }

    /// Dijkstra 搜尋；所有目標確定後提前結束（目標為空時搜尋整張圖）
    ///
    /// 路徑成本超出 Decimal 範圍時回傳 `InvalidInput`。
    pub fn search(graph: &DistributionGraph, source: usize, targets: &HashSet<usize>) -> Result<SearchTree> {
        let n = graph.node_count();
        let mut distances: Vec<Option<Decimal>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut remaining = targets.len();

        let mut heap = BinaryHeap::new();
        if source < n {
            distances[source] = Some(Decimal::ZERO);
            heap.push(Reverse((Decimal::ZERO, source)));
        }

        while let Some(Reverse((cost, node))) = heap.pop() {
            if settled[node] {
                continue;
            }
            settled[node] = true;

            if targets.contains(&node) {
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
            }

            for (next, weight) in graph.neighbors(node) {
                if settled[next] {
                    continue;
                }
                let candidate = cost.checked_add(weight).ok_or_else(|| {
                    AlbaError::InvalidInput(format!(
                        "經 {} 的路徑成本溢位",
                        graph.node_name(node).unwrap_or_default()
                    ))
                })?;
                // 只在嚴格更短時更新，等長路徑保留先找到的
                if distances[next].map_or(true, |current| candidate < current) {
                    distances[next] = Some(candidate);
                    predecessors[next] = Some(node);
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        Ok(SearchTree {
            source,
            distances,
            predecessors,
        })
    }

    fn route_plan(graph: &DistributionGraph, tree: &SearchTree, target: usize) -> Option<RoutePlan> {
        let total_cost = tree.distance(target)?;
        let path_nodes = tree
            .path_to(target)?
            .into_iter()
            .filter_map(|idx| graph.node_name(idx).map(str::to_string))
            .collect();

        Some(RoutePlan::new(path_nodes, total_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alba_core::EdgeSpec;
    use rstest::rstest;

    fn reference() -> DistributionGraph {
        DistributionGraph::reference_network().unwrap()
    }

    fn names(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("Cliente1", 15, &["Planta", "Bodega", "Cliente1"])]
    #[case("Cliente2", 18, &["Planta", "Bodega", "Cliente2"])]
    #[case("Bodega", 10, &["Planta", "Bodega"])]
    fn test_reference_routes(#[case] destination: &str, #[case] cost: i64, #[case] path: &[&str]) {
        let report = ShortestPathCalculator::shortest_paths(&reference(), "Planta", &[destination]).unwrap();
        let route = report.get(destination).unwrap().route().unwrap();

        assert_eq!(route.total_cost, Decimal::from(cost));
        assert_eq!(route.path_nodes, names(path));
    }

    #[test]
    fn test_tie_keeps_minimal_cost() {
        let report = ShortestPathCalculator::shortest_paths(&reference(), "Planta", &["Cliente3"]).unwrap();
        let route = report.get("Cliente3").unwrap().route().unwrap();

        // 直達與經 Bodega、Cliente2 皆為 25
        assert_eq!(route.total_cost, Decimal::from(25));
        assert!(
            route.path_nodes == names(&["Planta", "Cliente3"])
                || route.path_nodes == names(&["Planta", "Bodega", "Cliente2", "Cliente3"])
        );
    }

    #[test]
    fn test_source_to_itself() {
        let report = ShortestPathCalculator::shortest_paths(&reference(), "Planta", &["Planta"]).unwrap();

        assert_eq!(report.get("Planta"), Some(&RouteOutcome::Route(RoutePlan::trivial("Planta"))));
    }

    #[test]
    fn test_unreachable_does_not_abort_batch() {
        let mut graph = reference();
        graph.add_edge("Isla", "Muelle", Decimal::from(3)).unwrap();

        let report =
            ShortestPathCalculator::shortest_paths(&graph, "Planta", &["Isla", "Cliente2", "Muelle"]).unwrap();

        assert_eq!(report.len(), 3);
        assert!(report.get("Isla").unwrap().is_unreachable());
        assert!(report.get("Muelle").unwrap().is_unreachable());
        assert_eq!(report.get("Cliente2").unwrap().route().unwrap().total_cost, Decimal::from(18));
        assert_eq!(report.outcomes[0].destination, "Isla");
    }

    #[test]
    fn test_unknown_destination_is_error() {
        let result = ShortestPathCalculator::shortest_paths(&reference(), "Planta", &["Cliente1", "Cliente9"]);
        assert!(matches!(result, Err(AlbaError::UnknownLocation(name)) if name == "Cliente9"));
    }

    #[test]
    fn test_unknown_source_is_error() {
        let result = ShortestPathCalculator::shortest_paths(&reference(), "Fabrica", &["Cliente1"]);
        assert!(matches!(result, Err(AlbaError::UnknownLocation(name)) if name == "Fabrica"));
    }

    #[test]
    fn test_empty_destinations_is_error() {
        let empty: [&str; 0] = [];
        let result = ShortestPathCalculator::shortest_paths(&reference(), "Planta", &empty);
        assert!(matches!(result, Err(AlbaError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_edge_uses_minimum() {
        let graph = DistributionGraph::from_edges(&[
            EdgeSpec::new("A", "B", Decimal::from(10)),
            EdgeSpec::new("A", "B", Decimal::from(2)),
            EdgeSpec::new("B", "C", Decimal::from(1)),
            EdgeSpec::new("A", "C", Decimal::from(5)),
        ])
        .unwrap();

        let report = ShortestPathCalculator::shortest_paths(&graph, "A", &["C"]).unwrap();
        let route = report.get("C").unwrap().route().unwrap();

        assert_eq!(route.total_cost, Decimal::from(3));
        assert_eq!(route.path_nodes, names(&["A", "B", "C"]));
    }

    #[test]
    fn test_full_search_tree() {
        let graph = reference();
        let source = graph.node_index("Cliente3").unwrap();
        let tree = ShortestPathCalculator::search(&graph, source, &HashSet::new()).unwrap();

        assert_eq!(tree.distance(graph.node_index("Planta").unwrap()), Some(Decimal::from(25)));
        assert_eq!(tree.distance(graph.node_index("Cliente1").unwrap()), Some(Decimal::from(19)));
        assert_eq!(tree.distance(graph.node_index("Bodega").unwrap()), Some(Decimal::from(15)));
    }

    #[test]
    fn test_cost_overflow_is_error() {
        let graph = DistributionGraph::from_edges(&[
            EdgeSpec::new("A", "B", Decimal::MAX),
            EdgeSpec::new("B", "C", Decimal::MAX),
        ])
        .unwrap();

        // 單一邊仍可表示
        let report = ShortestPathCalculator::shortest_paths(&graph, "A", &["B"]).unwrap();
        assert_eq!(report.get("B").unwrap().route().unwrap().total_cost, Decimal::MAX);

        let result = ShortestPathCalculator::shortest_paths(&graph, "A", &["C"]);
        assert!(matches!(result, Err(AlbaError::InvalidInput(_))));
    }

    #[test]
    fn test_fractional_costs() {
        let graph = DistributionGraph::from_edges(&[
            EdgeSpec::new("A", "B", Decimal::new(15, 1)),
            EdgeSpec::new("B", "C", Decimal::new(25, 1)),
            EdgeSpec::new("A", "C", Decimal::new(41, 1)),
        ])
        .unwrap();

        let report = ShortestPathCalculator::shortest_paths(&graph, "A", &["C"]).unwrap();
        assert_eq!(report.get("C").unwrap().route().unwrap().total_cost, Decimal::from(4));
    }
}
