//! 配送網路圖（無向、非負權重）

use std::collections::{BTreeMap, HashMap};

use alba_core::{AlbaError, EdgeSpec, NetworkConfig, Result};
use rust_decimal::Decimal;

/// 無向加權圖
///
/// 重複邊只保留最小權重；自環忽略（節點仍會登錄）。
#[derive(Debug, Clone, Default)]
pub struct DistributionGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<BTreeMap<usize, Decimal>>,
}

impl DistributionGraph {
    /// 創建空圖
    pub fn new() -> Self {
        Self::default()
    }

    /// 由邊表一次建構
    pub fn from_edges(edges: &[EdgeSpec]) -> Result<Self> {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(&edge.from, &edge.to, edge.cost)?;
        }

        tracing::debug!("配送網路：{} 個節點，{} 條邊", graph.node_count(), graph.edge_count());
        Ok(graph)
    }

    /// 由網路配置建構（起點即使沒有邊也會登錄）
    pub fn from_network(config: &NetworkConfig) -> Result<Self> {
        let mut graph = Self::from_edges(&config.edges)?;
        graph.add_node(&config.source)?;
        Ok(graph)
    }

    /// 預設的工廠配送網路
    pub fn reference_network() -> Result<Self> {
        Self::from_network(&NetworkConfig::default())
    }

    /// 登錄節點，回傳索引
    pub fn add_node(&mut self, name: &str) -> Result<usize> {
        if name.trim().is_empty() {
            return Err(AlbaError::InvalidInput("地點名稱不可為空".to_string()));
        }
        if let Some(&idx) = self.index.get(name) {
            return Ok(idx);
        }

        let idx = self.nodes.len();
        self.nodes.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.adjacency.push(BTreeMap::new());
        Ok(idx)
    }

    /// 加入無向邊
    pub fn add_edge(&mut self, from: &str, to: &str, cost: Decimal) -> Result<()> {
        if cost < Decimal::ZERO {
            return Err(AlbaError::InvalidInput(format!(
                "邊 {} - {} 的權重不可為負數: {}",
                from, to, cost
            )));
        }

        let a = self.add_node(from)?;
        let b = self.add_node(to)?;
        if a == b {
            tracing::debug!("忽略自環: {}", from);
            return Ok(());
        }

        Self::keep_min(&mut self.adjacency[a], b, cost);
        Self::keep_min(&mut self.adjacency[b], a, cost);
        Ok(())
    }

    fn keep_min(neighbors: &mut BTreeMap<usize, Decimal>, target: usize, cost: Decimal) {
        neighbors
            .entry(target)
            .and_modify(|existing| *existing = (*existing).min(cost))
            .or_insert(cost);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn node_name(&self, idx: usize) -> Option<&str> {
        self.nodes.get(idx).map(String::as_str)
    }

    /// 兩節點間的直接邊權重
    pub fn edge_cost(&self, from: &str, to: &str) -> Option<Decimal> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        self.adjacency[a].get(&b).copied()
    }

    /// 相鄰節點（依索引排序）
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, Decimal)> + '_ {
        self.adjacency
            .get(idx)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(&n, &cost)| (n, cost)))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_network() {
        let graph = DistributionGraph::reference_network().unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 7);
        assert_eq!(graph.edge_cost("Bodega", "Cliente1"), Some(Decimal::from(5)));
        assert_eq!(graph.edge_cost("Cliente1", "Bodega"), Some(Decimal::from(5)));
        assert_eq!(graph.edge_cost("Planta", "Cliente2"), None);
    }

    #[test]
    fn test_duplicate_edges_keep_minimum() {
        let graph = DistributionGraph::from_edges(&[
            EdgeSpec::new("A", "B", Decimal::from(9)),
            EdgeSpec::new("B", "A", Decimal::from(4)),
            EdgeSpec::new("A", "B", Decimal::from(6)),
        ])
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_cost("A", "B"), Some(Decimal::from(4)));
    }

    #[test]
    fn test_self_loop_ignored() {
        let graph = DistributionGraph::from_edges(&[EdgeSpec::new("A", "A", Decimal::from(3))]).unwrap();

        assert!(graph.contains("A"));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.neighbors(0).count(), 0);
    }

    #[test]
    fn test_reject_negative_weight() {
        let result = DistributionGraph::from_edges(&[EdgeSpec::new("A", "B", Decimal::from(-1))]);
        assert!(matches!(result, Err(AlbaError::InvalidInput(_))));
    }

    #[test]
    fn test_reject_blank_name() {
        let result = DistributionGraph::from_edges(&[EdgeSpec::new("A", "  ", Decimal::ONE)]);
        assert!(matches!(result, Err(AlbaError::InvalidInput(_))));
    }

    #[test]
    fn test_isolated_source_registered() {
        let config = NetworkConfig {
            source: "Depot".to_string(),
            edges: vec![EdgeSpec::new("A", "B", Decimal::ONE)],
        };
        let graph = DistributionGraph::from_network(&config).unwrap();

        assert!(graph.contains("Depot"));
        assert_eq!(graph.node_count(), 3);
    }
}
