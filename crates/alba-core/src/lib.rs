//! # Alba Core
//!
//! 核心資料模型、錯誤類型與配置定義

pub mod config;
pub mod plan;
pub mod resources;
pub mod route;

use std::time::Duration;

use serde::{Deserialize, Serialize};

// Re-export 主要類型
pub use config::{AppConfig, EdgeMetric, EdgeSpec, NetworkConfig, PlacesConfig, ProductSpec, ProductionModelConfig, RoutingConfig};
pub use plan::ProductionPlan;
pub use resources::{ResourceKind, ResourceLimits, ResourceUsage};
pub use route::{DestinationOutcome, LatLng, RouteOutcome, RoutePlan, RoutingReport};

/// 請求層級錯誤（整批請求失敗）
#[derive(Debug, thiserror::Error)]
pub enum AlbaError {
    #[error("無效的輸入: {0}")]
    InvalidInput(String),

    #[error("生產模型不可行: {0}")]
    Infeasible(String),

    #[error("求解器錯誤: {0}")]
    SolverFailure(String),

    #[error("找不到地點: {0}")]
    UnknownLocation(String),

    #[error("無法解析起點: {origin} ({source})")]
    OriginUnavailable {
        origin: String,
        #[source]
        source: ServiceError,
    },

    #[error("配置錯誤: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AlbaError>;

/// 外部服務錯誤（僅影響單一目的地）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ServiceError {
    #[error("無法地理編碼: {0}")]
    AddressNotFound(String),

    #[error("{origin} 到 {destination} 沒有可行路線")]
    NoRoute { origin: String, destination: String },

    #[error("外部服務逾時（{0:?}）")]
    Timeout(Duration),

    #[error("外部服務傳輸錯誤: {0}")]
    Transport(String),

    #[error("無效的路線折線: {0}")]
    MalformedPolyline(String),

    #[error("外部服務回應超出範圍: {0}")]
    InvalidResponse(String),
}
