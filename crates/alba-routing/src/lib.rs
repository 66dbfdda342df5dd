//! # Alba Routing
//!
//! 配送網路最短路徑與即時路線計算

pub mod dijkstra;
pub mod graph;
pub mod live;
pub mod offline;
pub mod polyline;
pub mod service;

// Re-export 主要類型
pub use dijkstra::ShortestPathCalculator;
pub use graph::DistributionGraph;
pub use live::{LiveRoute, LiveRouter, LiveRoutingReport};
pub use offline::OfflineMapsService;
pub use service::{Directions, MapsService};
