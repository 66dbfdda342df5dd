//! 配送路線模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// 地理座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// 單一目的地的最短路線
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// 從起點到目的地的節點序列（不重複）
    pub path_nodes: Vec<String>,

    /// 路徑上所有邊權重的總和
    pub total_cost: Decimal,
}

impl RoutePlan {
    /// 創建新的路線
    pub fn new(path_nodes: Vec<String>, total_cost: Decimal) -> Self {
        Self {
            path_nodes,
            total_cost,
        }
    }

    /// 起點與目的地相同時的零成本路線
    pub fn trivial(node: &str) -> Self {
        Self::new(vec![node.to_string()], Decimal::ZERO)
    }

    /// 經過的邊數
    pub fn hops(&self) -> usize {
        self.path_nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&str> {
        self.path_nodes.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.path_nodes.last().map(String::as_str)
    }
}

/// 單一目的地的計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteOutcome<R = RoutePlan> {
    /// 找到路線
    Route(R),
    /// 圖中沒有任何路徑可達
    Unreachable,
    /// 外部服務失敗（僅影響此目的地）
    ServiceFailure(ServiceError),
}

impl<R> RouteOutcome<R> {
    pub fn route(&self) -> Option<&R> {
        match self {
            RouteOutcome::Route(route) => Some(route),
            _ => None,
        }
    }

    pub fn is_route(&self) -> bool {
        matches!(self, RouteOutcome::Route(_))
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, RouteOutcome::Unreachable)
    }

    pub fn map<T>(self, f: impl FnOnce(R) -> T) -> RouteOutcome<T> {
        match self {
            RouteOutcome::Route(route) => RouteOutcome::Route(f(route)),
            RouteOutcome::Unreachable => RouteOutcome::Unreachable,
            RouteOutcome::ServiceFailure(err) => RouteOutcome::ServiceFailure(err),
        }
    }
}

/// 目的地與其結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationOutcome<R = RoutePlan> {
    pub destination: String,
    pub outcome: RouteOutcome<R>,
}

/// 一批目的地的路線報告（依請求順序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingReport<R = RoutePlan> {
    /// 起點
    pub source: String,

    /// 各目的地結果
    pub outcomes: Vec<DestinationOutcome<R>>,
}

impl<R> RoutingReport<R> {
    pub fn new(source: String) -> Self {
        Self {
            source,
            outcomes: Vec::new(),
        }
    }

    /// 加入結果；同一目的地只保留第一次出現
    pub fn push(&mut self, destination: String, outcome: RouteOutcome<R>) {
        if self.get(&destination).is_none() {
            self.outcomes.push(DestinationOutcome { destination, outcome });
        }
    }

    /// 查詢單一目的地
    pub fn get(&self, destination: &str) -> Option<&RouteOutcome<R>> {
        self.outcomes
            .iter()
            .find(|o| o.destination == destination)
            .map(|o| &o.outcome)
    }

    /// 所有成功的路線
    pub fn routes(&self) -> impl Iterator<Item = (&str, &R)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.outcome.route().map(|r| (o.destination.as_str(), r)))
    }

    /// 失敗（不可達或服務失敗）的目的地數量
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.outcome.is_route()).count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_plan() {
        let route = RoutePlan::new(
            vec!["Planta".to_string(), "Bodega".to_string(), "Cliente1".to_string()],
            Decimal::from(15),
        );

        assert_eq!(route.hops(), 2);
        assert_eq!(route.source(), Some("Planta"));
        assert_eq!(route.destination(), Some("Cliente1"));

        let trivial = RoutePlan::trivial("Planta");
        assert_eq!(trivial.hops(), 0);
        assert_eq!(trivial.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_report_keeps_first_occurrence() {
        let mut report: RoutingReport = RoutingReport::new("Planta".to_string());
        report.push("Cliente1".to_string(), RouteOutcome::Unreachable);
        report.push("Cliente1".to_string(), RouteOutcome::Route(RoutePlan::trivial("Cliente1")));
        report.push(
            "Cliente2".to_string(),
            RouteOutcome::ServiceFailure(ServiceError::Transport("offline".to_string())),
        );

        assert_eq!(report.len(), 2);
        assert!(report.get("Cliente1").unwrap().is_unreachable());
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.routes().count(), 0);
    }

    #[test]
    fn test_outcome_map() {
        let outcome: RouteOutcome = RouteOutcome::Route(RoutePlan::trivial("Planta"));
        let mapped = outcome.map(|r| r.path_nodes.len());
        assert_eq!(mapped, RouteOutcome::Route(1));
    }
}
