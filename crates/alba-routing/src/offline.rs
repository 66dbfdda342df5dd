//! 離線地圖服務（記憶體資料表）

use std::collections::HashMap;

use alba_core::{LatLng, ServiceError};

use crate::service::{Directions, MapsService};

/// 以預先載入的地點與路線回應查詢的地圖服務
#[derive(Debug, Clone, Default)]
pub struct OfflineMapsService {
    places: HashMap<String, LatLng>,
    routes: HashMap<(String, String), Directions>,
    photos: HashMap<String, String>,
}

impl OfflineMapsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：登錄地點座標
    pub fn with_place(mut self, address: &str, position: LatLng) -> Self {
        self.places.insert(address.to_string(), position);
        self
    }

    /// 建構器模式：登錄單向路線
    pub fn with_route(mut self, origin: &str, destination: &str, directions: Directions) -> Self {
        self.routes
            .insert((origin.to_string(), destination.to_string()), directions);
        self
    }

    /// 建構器模式：登錄地點照片參照
    pub fn with_photo(mut self, place: &str, photo_reference: &str) -> Self {
        self.photos.insert(place.to_string(), photo_reference.to_string());
        self
    }
}

impl MapsService for OfflineMapsService {
    fn geocode(&self, address: &str) -> Result<LatLng, ServiceError> {
        self.places
            .get(address)
            .copied()
            .ok_or_else(|| ServiceError::AddressNotFound(address.to_string()))
    }

    fn directions(&self, origin: &str, destination: &str) -> Result<Directions, ServiceError> {
        self.geocode(origin)?;
        self.geocode(destination)?;

        self.routes
            .get(&(origin.to_string(), destination.to_string()))
            .cloned()
            .ok_or_else(|| ServiceError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }

    fn find_place_photo(&self, place: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.photos.get(place).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_lookups() {
        let service = OfflineMapsService::new()
            .with_place("A", LatLng::new(4.6, -74.1))
            .with_place("B", LatLng::new(4.7, -74.0))
            .with_route("A", "B", Directions::new(1200, 300, ""))
            .with_photo("B", "REF-B");

        assert_eq!(service.geocode("A").unwrap(), LatLng::new(4.6, -74.1));
        assert_eq!(service.directions("A", "B").unwrap().distance_meters, 1200);
        assert!(matches!(service.directions("B", "A"), Err(ServiceError::NoRoute { .. })));
        assert!(matches!(service.directions("A", "C"), Err(ServiceError::AddressNotFound(name)) if name == "C"));
        assert_eq!(service.find_place_photo("B").unwrap(), Some("REF-B".to_string()));
        assert_eq!(service.find_place_photo("A").unwrap(), None);
    }
}
