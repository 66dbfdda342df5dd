//! 即時路線模式：以外部地圖服務的行車距離/時間為邊權重

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alba_core::{
    AlbaError, EdgeMetric, LatLng, Result, RouteOutcome, RoutePlan, RoutingConfig, RoutingReport, ServiceError,
};
use chrono::TimeDelta;
use crossbeam_channel::RecvTimeoutError;
use rayon::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dijkstra::ShortestPathCalculator;
use crate::graph::DistributionGraph;
use crate::polyline;
use crate::service::{Directions, MapsService};

/// 單一目的地的即時路線
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRoute {
    /// 起點到目的地的路線與成本（依 `EdgeMetric`）
    pub plan: RoutePlan,

    /// 行駛距離（公里）
    pub distance_km: Decimal,

    /// 行駛時間
    pub duration: TimeDelta,

    /// 目的地座標
    pub position: LatLng,

    /// 路線折線
    pub waypoints: Vec<LatLng>,

    /// 目的地照片
    pub photo_url: Option<String>,
}

/// 一批即時路線結果
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRoutingReport {
    /// 起點座標
    pub origin_position: LatLng,

    /// 各目的地結果（依請求順序）
    pub routes: RoutingReport<LiveRoute>,
}

/// 外部查詢得到的單段行程
#[derive(Debug, Clone)]
struct Leg {
    position: LatLng,
    distance_km: Decimal,
    duration: TimeDelta,
    waypoints: Vec<LatLng>,
    photo_url: Option<String>,
}

/// 即時路線計算器
pub struct LiveRouter {
    service: Arc<dyn MapsService>,
    config: RoutingConfig,
}

impl LiveRouter {
    /// 創建新的即時路線計算器
    pub fn new(service: Arc<dyn MapsService>, config: RoutingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { service, config })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// 主計算入口
    ///
    /// 起點無法解析時整批失敗；單一目的地的服務失敗或逾時只影響該目的地。
    pub fn compute<S: AsRef<str>>(&self, origin: &str, destinations: &[S]) -> Result<LiveRoutingReport> {
        if origin.trim().is_empty() {
            return Err(AlbaError::InvalidInput("起點不可為空".to_string()));
        }
        if destinations.is_empty() {
            return Err(AlbaError::InvalidInput("目的地清單不可為空".to_string()));
        }
        if destinations.iter().any(|d| d.as_ref().trim().is_empty()) {
            return Err(AlbaError::InvalidInput("目的地名稱不可為空".to_string()));
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("live_routes", %request_id, origin);
        let _enter = span.enter();

        let unique = Self::dedup(destinations);
        tracing::info!("開始即時路線計算：目的地 {} 個", unique.len());
        let start_time = std::time::Instant::now();

        // Step 1: 起點地理編碼
        let origin_position = {
            let service = Arc::clone(&self.service);
            let address = origin.to_string();
            let timeout = self.config.service_timeout();
            call_before(Instant::now() + timeout, timeout, move || service.geocode(&address)).map_err(
                |source| AlbaError::OriginUnavailable {
                    origin: origin.to_string(),
                    source,
                },
            )?
        };

        // Step 2: 逐目的地查詢（各自獨立）
        let lookups: Vec<(&str, std::result::Result<Leg, ServiceError>)> = if self.config.parallel {
            unique
                .par_iter()
                .map(|destination| (*destination, self.lookup(origin, origin_position, destination)))
                .collect()
        } else {
            unique
                .iter()
                .map(|destination| (*destination, self.lookup(origin, origin_position, destination)))
                .collect()
        };

        // Step 3: 以成功的行程建立星狀網路並求最短路徑
        let mut graph = DistributionGraph::new();
        graph.add_node(origin)?;
        let mut resolved = Vec::new();
        for (destination, lookup) in &lookups {
            if let Ok(leg) = lookup {
                graph.add_edge(origin, destination, self.edge_weight(leg))?;
                resolved.push(*destination);
            }
        }
        let shortest = if resolved.is_empty() {
            RoutingReport::new(origin.to_string())
        } else {
            ShortestPathCalculator::shortest_paths(&graph, origin, &resolved)?
        };

        // Step 4: 組合結果
        let mut routes = RoutingReport::new(origin.to_string());
        for (destination, lookup) in lookups {
            let outcome = match lookup {
                Ok(leg) => match shortest.get(destination) {
                    Some(RouteOutcome::Route(plan)) => RouteOutcome::Route(Self::live_route(plan.clone(), leg)),
                    _ => RouteOutcome::Unreachable,
                },
                Err(ServiceError::NoRoute { .. }) => {
                    tracing::warn!("{} 沒有可行路線", destination);
                    RouteOutcome::Unreachable
                }
                Err(err) => {
                    tracing::warn!("{} 查詢失敗: {}", destination, err);
                    RouteOutcome::ServiceFailure(err)
                }
            };
            routes.push(destination.to_string(), outcome);
        }

        tracing::info!(
            "即時路線計算完成，耗時 {:?}，失敗 {} 個",
            start_time.elapsed(),
            routes.failure_count()
        );

        Ok(LiveRoutingReport {
            origin_position,
            routes,
        })
    }

    fn dedup<S: AsRef<str>>(destinations: &[S]) -> Vec<&str> {
        let mut seen = HashSet::new();
        destinations
            .iter()
            .map(|d| d.as_ref())
            .filter(|d| seen.insert(*d))
            .collect()
    }

    /// 查詢單一目的地的座標、路線與照片
    ///
    /// 三次外部呼叫共用同一個逾時期限。
    fn lookup(&self, origin: &str, origin_position: LatLng, destination: &str) -> std::result::Result<Leg, ServiceError> {
        tracing::debug!("查詢目的地: {}", destination);

        if destination == origin {
            return Ok(Leg {
                position: origin_position,
                distance_km: Decimal::ZERO,
                duration: TimeDelta::zero(),
                waypoints: vec![origin_position],
                photo_url: None,
            });
        }

        let timeout = self.config.service_timeout();
        let deadline = Instant::now() + timeout;

        let service = Arc::clone(&self.service);
        let (from, to) = (origin.to_string(), destination.to_string());
        let (position, directions): (LatLng, Directions) = call_before(deadline, timeout, move || {
            let position = service.geocode(&to)?;
            let directions = service.directions(&from, &to)?;
            Ok((position, directions))
        })?;

        let waypoints = polyline::decode(&directions.encoded_polyline)?;
        let distance_km = meters_to_km(directions.distance_meters)?;
        let duration = i64::try_from(directions.duration_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                ServiceError::InvalidResponse(format!("行駛時間超出範圍: {} 秒", directions.duration_seconds))
            })?;

        Ok(Leg {
            position,
            distance_km,
            duration,
            waypoints,
            photo_url: self.photo_url(destination, deadline, timeout),
        })
    }

    /// 照片查詢失敗或超過期限不影響路線
    fn photo_url(&self, place: &str, deadline: Instant, timeout: Duration) -> Option<String> {
        let service = Arc::clone(&self.service);
        let name = place.to_string();

        match call_before(deadline, timeout, move || service.find_place_photo(&name)) {
            Ok(Some(reference)) => Some(self.config.places.photo_url(&reference)),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("{} 的照片查詢失敗: {}", place, err);
                None
            }
        }
    }

    fn edge_weight(&self, leg: &Leg) -> Decimal {
        match self.config.edge_metric {
            EdgeMetric::Distance => leg.distance_km,
            EdgeMetric::Duration => (Decimal::from(leg.duration.num_seconds()) / Decimal::from(60)).round_dp(2),
        }
    }

    fn live_route(plan: RoutePlan, leg: Leg) -> LiveRoute {
        LiveRoute {
            plan,
            distance_km: leg.distance_km,
            duration: leg.duration,
            position: leg.position,
            waypoints: leg.waypoints,
            photo_url: leg.photo_url,
        }
    }
}

fn meters_to_km(meters: u64) -> std::result::Result<Decimal, ServiceError> {
    i64::try_from(meters)
        .map(|m| Decimal::new(m, 3))
        .map_err(|_| ServiceError::InvalidResponse(format!("行駛距離超出範圍: {} 公尺", meters)))
}

/// 在背景執行緒呼叫外部服務，超過期限即放棄等待
///
/// `timeout` 只用於回報的錯誤內容。
fn call_before<T, F>(deadline: Instant, timeout: Duration, call: F) -> std::result::Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce() -> std::result::Result<T, ServiceError> + Send + 'static,
{
    if Instant::now() >= deadline {
        return Err(ServiceError::Timeout(timeout));
    }

    let (tx, rx) = crossbeam_channel::bounded(1);
    // 逾時後執行緒不會被中止，會繼續執行到外部呼叫返回為止；
    // 屆時接收端已離開，結果直接丟棄
    std::thread::spawn(move || {
        let _ = tx.send(call());
    });

    match rx.recv_deadline(deadline) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(ServiceError::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(ServiceError::Transport("外部服務呼叫異常中止".to_string())),
    }
}
