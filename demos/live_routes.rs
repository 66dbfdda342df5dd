//! # 即時路線範例
//!
//! 以離線地圖服務模擬外部地圖 API，
//! 從波哥大工廠計算到各門市的行車路線。

use std::sync::Arc;

use alba::{
    compute_live_routes, parse_destination_lines, Directions, EdgeMetric, LatLng, OfflineMapsService, RouteOutcome,
    RoutingConfig,
};

const ORIGIN: &str = "Calle 26 # 13-45, Bogotá, Colombia";

fn sample_service() -> OfflineMapsService {
    OfflineMapsService::new()
        .with_place(ORIGIN, LatLng::new(4.6126, -74.0705))
        .with_place("Éxito Calle 80", LatLng::new(4.6944, -74.0862))
        .with_place("Éxito Av 68", LatLng::new(4.6602, -74.1031))
        .with_place("Éxito Suba", LatLng::new(4.7411, -74.0835))
        .with_route(ORIGIN, "Éxito Calle 80", Directions::new(11_300, 1_680, "_p~iF~ps|U_ulLnnqC"))
        .with_route(ORIGIN, "Éxito Av 68", Directions::new(8_900, 1_260, "_p~iF~ps|U"))
        .with_route(ORIGIN, "Éxito Suba", Directions::new(16_900, 2_460, "_p~iF~ps|U_ulLnnqC_mqNvxq`@"))
        .with_photo("Éxito Calle 80", "PHOTO-CALLE-80")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("🛰️  ===== 即時路線範例 =====");
    println!();

    // ========== 1. 準備目的地 ==========
    println!("📍 步驟 1: 讀取目的地清單");
    let destinations = parse_destination_lines(
        "Éxito Calle 80
         Éxito Av 68

         Éxito Suba
         Éxito Chapinero",
    );
    for destination in &destinations {
        println!("   - {}", destination);
    }
    println!();

    // ========== 2. 依行車距離計算 ==========
    println!("🧭 步驟 2: 依行車距離計算");
    let service = Arc::new(sample_service());
    let report = compute_live_routes(service.clone(), RoutingConfig::default(), ORIGIN, &destinations)?;
    println!("   起點座標: ({}, {})", report.origin_position.lat, report.origin_position.lng);

    for outcome in &report.routes.outcomes {
        match &outcome.outcome {
            RouteOutcome::Route(route) => {
                println!(
                    "   ✓ {}：{} km，約 {} 分鐘，折線 {} 點",
                    outcome.destination,
                    route.distance_km,
                    route.duration.num_minutes(),
                    route.waypoints.len()
                );
                if let Some(url) = &route.photo_url {
                    println!("     照片: {}", url);
                }
            }
            RouteOutcome::Unreachable => println!("   ⚠ {}：沒有可行路線", outcome.destination),
            RouteOutcome::ServiceFailure(err) => println!("   ✗ {}：{}", outcome.destination, err),
        }
    }
    println!();

    // ========== 3. 依行車時間計算 ==========
    println!("⏱️  步驟 3: 依行車時間計算");
    let config = RoutingConfig::default().with_edge_metric(EdgeMetric::Duration);
    let report = compute_live_routes(service, config, ORIGIN, &destinations)?;
    for (destination, route) in report.routes.routes() {
        println!("   {}：成本 {} 分鐘", destination, route.plan.total_cost);
    }
    println!("   失敗 {} 個", report.routes.failure_count());

    Ok(())
}
