//! 外部地圖服務介面（地理編碼、路線規劃、地點照片）

use alba_core::{LatLng, ServiceError};

/// 路線服務回傳的行車路線
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directions {
    /// 行駛距離（公尺）
    pub distance_meters: u64,

    /// 行駛時間（秒）
    pub duration_seconds: u64,

    /// 編碼折線
    pub encoded_polyline: String,
}

impl Directions {
    pub fn new(distance_meters: u64, duration_seconds: u64, encoded_polyline: &str) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            encoded_polyline: encoded_polyline.to_string(),
        }
    }
}

/// 外部地圖服務
///
/// 每次呼叫都可能失敗；失敗只影響該地點。實作必須可跨執行緒共用。
pub trait MapsService: Send + Sync {
    /// 地址轉座標
    fn geocode(&self, address: &str) -> Result<LatLng, ServiceError>;

    /// 起點到目的地的行車路線；沒有路線時回傳 `ServiceError::NoRoute`
    fn directions(&self, origin: &str, destination: &str) -> Result<Directions, ServiceError>;

    /// 地點的照片參照（沒有照片為 None）
    fn find_place_photo(&self, _place: &str) -> Result<Option<String>, ServiceError> {
        Ok(None)
    }
}
