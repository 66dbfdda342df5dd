//! 模型與服務配置

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resources::ResourceKind;
use crate::{AlbaError, Result};

/// 單一產品的利潤與資源耗用率
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductSpec {
    /// 產品名稱
    pub name: String,

    /// 單位利潤
    pub unit_profit: Decimal,

    /// 每單位耗用布料
    pub fabric_per_unit: Decimal,

    /// 每單位耗用縫製工時
    pub sewing_hours_per_unit: Decimal,

    /// 每單位耗用印刷工時
    pub printing_hours_per_unit: Decimal,
}

impl ProductSpec {
    /// 創建新的產品規格
    pub fn new(
        name: &str,
        unit_profit: Decimal,
        fabric_per_unit: Decimal,
        sewing_hours_per_unit: Decimal,
        printing_hours_per_unit: Decimal,
    ) -> Self {
        Self {
            name: name.to_string(),
            unit_profit,
            fabric_per_unit,
            sewing_hours_per_unit,
            printing_hours_per_unit,
        }
    }

    /// 每單位耗用指定資源的數量
    pub fn consumption(&self, kind: ResourceKind) -> Decimal {
        match kind {
            ResourceKind::Fabric => self.fabric_per_unit,
            ResourceKind::Sewing => self.sewing_hours_per_unit,
            ResourceKind::Printing => self.printing_hours_per_unit,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.unit_profit < Decimal::ZERO {
            return Err(AlbaError::Config(format!("{} 的單位利潤不可為負數", self.name)));
        }
        for kind in ResourceKind::ALL {
            if self.consumption(kind) < Decimal::ZERO {
                return Err(AlbaError::Config(format!(
                    "{} 的 {} 耗用率不可為負數",
                    self.name,
                    kind.label()
                )));
            }
        }
        // 不耗用任何資源的產品會讓模型無界
        if ResourceKind::ALL.iter().all(|kind| self.consumption(*kind).is_zero()) {
            return Err(AlbaError::Config(format!("{} 必須至少耗用一種資源", self.name)));
        }
        Ok(())
    }
}

/// 生產最佳化模型配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductionModelConfig {
    /// 運動款
    pub sporty: ProductSpec,

    /// 休閒款
    pub casual: ProductSpec,
}

impl Default for ProductionModelConfig {
    fn default() -> Self {
        Self {
            sporty: ProductSpec::new(
                "sporty",
                Decimal::from(15000),
                Decimal::from(2),
                Decimal::ONE,
                Decimal::new(5, 1),
            ),
            casual: ProductSpec::new(
                "casual",
                Decimal::from(10000),
                Decimal::ONE,
                Decimal::new(15, 1),
                Decimal::new(25, 2),
            ),
        }
    }
}

impl ProductionModelConfig {
    /// 建構器模式：設置運動款規格
    pub fn with_sporty(mut self, spec: ProductSpec) -> Self {
        self.sporty = spec;
        self
    }

    /// 建構器模式：設置休閒款規格
    pub fn with_casual(mut self, spec: ProductSpec) -> Self {
        self.casual = spec;
        self
    }

    /// 檢查耗用率與利潤是否有效
    pub fn validate(&self) -> Result<()> {
        self.sporty.validate()?;
        self.casual.validate()
    }
}

/// 即時路線模式下的邊權重依據
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMetric {
    /// 行駛距離（公里）
    #[default]
    Distance,
    /// 行駛時間（分鐘）
    Duration,
}

/// 地點照片查詢配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacesConfig {
    /// 照片服務端點
    pub photo_endpoint: String,

    /// 照片最大寬度（像素）
    pub max_width: u32,

    /// API 金鑰（不序列化）
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            photo_endpoint: "https://maps.googleapis.com/maps/api/place/photo".to_string(),
            max_width: 250,
            api_key: None,
        }
    }
}

impl PlacesConfig {
    /// 建構器模式：設置 API 金鑰
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// 由照片參照組出照片網址
    pub fn photo_url(&self, photo_reference: &str) -> String {
        let mut url = format!(
            "{}?maxwidth={}&photoreference={}",
            self.photo_endpoint, self.max_width, photo_reference
        );
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(key);
        }
        url
    }
}

/// 配送路線配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// 邊權重依據
    pub edge_metric: EdgeMetric,

    /// 每個目的地外部查詢的逾時（毫秒，地理編碼、路線與照片共用）
    pub service_timeout_ms: u64,

    /// 是否並行查詢各目的地
    pub parallel: bool,

    /// 照片查詢
    pub places: PlacesConfig,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            edge_metric: EdgeMetric::Distance,
            service_timeout_ms: 10_000,
            parallel: true,
            places: PlacesConfig::default(),
        }
    }
}

impl RoutingConfig {
    /// 建構器模式：設置邊權重依據
    pub fn with_edge_metric(mut self, metric: EdgeMetric) -> Self {
        self.edge_metric = metric;
        self
    }

    /// 建構器模式：設置逾時
    pub fn with_service_timeout(mut self, timeout: Duration) -> Self {
        self.service_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// 建構器模式：設置是否並行
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 建構器模式：設置照片查詢
    pub fn with_places(mut self, places: PlacesConfig) -> Self {
        self.places = places;
        self
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_millis(self.service_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_timeout_ms == 0 {
            return Err(AlbaError::Config("service_timeout_ms 必須大於 0".to_string()));
        }
        if self.places.max_width == 0 {
            return Err(AlbaError::Config("places.max_width 必須大於 0".to_string()));
        }
        Ok(())
    }
}

/// 配送網路中的一條邊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub cost: Decimal,
}

impl EdgeSpec {
    pub fn new(from: &str, to: &str, cost: Decimal) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            cost,
        }
    }
}

/// 固定邊表的配送網路
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// 固定起點
    pub source: String,

    /// 無向邊
    pub edges: Vec<EdgeSpec>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let edge = |from: &str, to: &str, cost: i64| EdgeSpec::new(from, to, Decimal::from(cost));
        Self {
            source: "Planta".to_string(),
            edges: vec![
                edge("Planta", "Bodega", 10),
                edge("Planta", "Cliente1", 20),
                edge("Bodega", "Cliente1", 5),
                edge("Bodega", "Cliente2", 8),
                edge("Cliente1", "Cliente2", 12),
                edge("Planta", "Cliente3", 25),
                edge("Cliente2", "Cliente3", 7),
            ],
        }
    }
}

/// 應用程式配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub production: ProductionModelConfig,
    pub routing: RoutingConfig,
    pub network: NetworkConfig,
}

impl AppConfig {
    /// 從 JSON 字串載入並驗證
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| AlbaError::Config(format!("無法解析配置: {}", e)))?;
        config.production.validate()?;
        config.routing.validate()?;
        Ok(config)
    }

    /// 從 JSON 檔案載入並驗證
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AlbaError::Config(format!("無法讀取 {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_production_model() {
        let config = ProductionModelConfig::default();

        assert_eq!(config.sporty.unit_profit, Decimal::from(15000));
        assert_eq!(config.sporty.consumption(ResourceKind::Fabric), Decimal::from(2));
        assert_eq!(config.sporty.consumption(ResourceKind::Sewing), Decimal::ONE);
        assert_eq!(config.sporty.consumption(ResourceKind::Printing), Decimal::new(5, 1));
        assert_eq!(config.casual.unit_profit, Decimal::from(10000));
        assert_eq!(config.casual.consumption(ResourceKind::Fabric), Decimal::ONE);
        assert_eq!(config.casual.consumption(ResourceKind::Sewing), Decimal::new(15, 1));
        assert_eq!(config.casual.consumption(ResourceKind::Printing), Decimal::new(25, 2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reject_free_product() {
        let config = ProductionModelConfig::default().with_casual(ProductSpec::new(
            "casual",
            Decimal::from(10000),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        ));

        assert!(matches!(config.validate(), Err(AlbaError::Config(_))));
    }

    #[test]
    fn test_reject_negative_consumption() {
        let config = ProductionModelConfig::default().with_sporty(ProductSpec::new(
            "sporty",
            Decimal::from(15000),
            Decimal::from(-2),
            Decimal::ONE,
            Decimal::ONE,
        ));

        assert!(matches!(config.validate(), Err(AlbaError::Config(_))));
    }

    #[test]
    fn test_photo_url() {
        let places = PlacesConfig::default().with_api_key("KEY");

        assert_eq!(
            places.photo_url("REF"),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=250&photoreference=REF&key=KEY"
        );
        assert_eq!(
            PlacesConfig::default().photo_url("REF"),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=250&photoreference=REF"
        );
    }

    #[test]
    fn test_load_partial_json() {
        let json = r#"{
            "routing": { "edge_metric": "duration", "service_timeout_ms": 2500 },
            "network": { "source": "A", "edges": [ { "from": "A", "to": "B", "cost": 3 } ] }
        }"#;

        let config = AppConfig::from_json_str(json).unwrap();

        assert_eq!(config.production, ProductionModelConfig::default());
        assert_eq!(config.routing.edge_metric, EdgeMetric::Duration);
        assert_eq!(config.routing.service_timeout(), Duration::from_millis(2500));
        assert!(config.routing.parallel);
        assert_eq!(config.network.source, "A");
        assert_eq!(config.network.edges, vec![EdgeSpec::new("A", "B", Decimal::from(3))]);
    }

    #[test]
    fn test_reject_unknown_field() {
        let result = AppConfig::from_json_str(r#"{ "routing": { "timeout": 5 } }"#);
        assert!(matches!(result, Err(AlbaError::Config(_))));
    }

    #[test]
    fn test_reject_zero_timeout() {
        let result = AppConfig::from_json_str(r#"{ "routing": { "service_timeout_ms": 0 } }"#);
        assert!(matches!(result, Err(AlbaError::Config(_))));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = RoutingConfig::default().with_places(PlacesConfig::default().with_api_key("SECRET"));
        let json = serde_json::to_string(&config).unwrap();

        assert!(!json.contains("SECRET"));
    }
}
