//! 附近医疗机构查询
//!
//! 查询结果统一经过 [`rank_facilities`] 处理：按距离升序排序，
//! 同名机构只保留最近的一个，并截断到配置的数量上限。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info, warn};
use triage_core::utils::{format_distance, haversine_km};
use triage_core::{Facility, GeoPoint, Result, TriageError};

const PHONE_NOT_AVAILABLE: &str = "Phone not available";
const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// 机构查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityLookupConfig {
    /// Overpass API 地址
    pub endpoint: String,
    /// 搜索半径 (米)
    pub radius_m: u32,
    /// 返回数量上限
    pub max_results: usize,
    /// 请求超时 (秒)
    pub timeout_secs: u64,
}

impl Default for FacilityLookupConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
            radius_m: 5000,
            max_results: 10,
            timeout_secs: 25,
        }
    }
}

/// 机构查询接口
#[async_trait]
pub trait FacilityProvider: Send + Sync {
    /// 获取查询源名称
    fn name(&self) -> &str;

    /// 查询指定位置附近的医疗机构，结果已排序、去重并截断
    async fn nearby(&self, origin: GeoPoint) -> Result<Vec<Facility>>;
}

/// 距离升序排序，按名称（忽略大小写和首尾空白）去重保留最近者，截断到 `max` 条
pub fn rank_facilities(mut candidates: Vec<Facility>, max: usize) -> Vec<Facility> {
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let mut seen = HashSet::new();
    candidates.retain(|facility| seen.insert(facility.name.trim().to_lowercase()));
    candidates.truncate(max);
    candidates
}

/// 基于OpenStreetMap Overpass API的机构查询
pub struct OverpassProvider {
    config: FacilityLookupConfig,
    client: reqwest::Client,
}

impl OverpassProvider {
    pub fn new(config: FacilityLookupConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("health-triage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TriageError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// 构造 Overpass QL 查询语句
    fn build_query(&self, origin: &GeoPoint) -> String {
        let around = format!(
            "(around:{},{},{})",
            self.config.radius_m, origin.latitude, origin.longitude
        );
        let filter = r#"["amenity"~"^(hospital|clinic)$"]"#;

        format!(
            "[out:json][timeout:{timeout}];(node{filter}{around};way{filter}{around};relation{filter}{around};);out center tags;",
            timeout = self.config.timeout_secs,
            filter = filter,
            around = around,
        )
    }
}

#[async_trait]
impl FacilityProvider for OverpassProvider {
    fn name(&self) -> &str {
        "overpass"
    }

    async fn nearby(&self, origin: GeoPoint) -> Result<Vec<Facility>> {
        let query = self.build_query(&origin);
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| TriageError::ExternalService(format!("facility lookup failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Overpass API returned status {}", status);
            return Err(TriageError::ExternalService(format!(
                "facility lookup failed with status: {}",
                status
            )));
        }

        let body: OverpassResponse = response
            .json()
            .await
            .map_err(|e| TriageError::ExternalService(format!("invalid facility response: {}", e)))?;

        let total = body.elements.len();
        let candidates: Vec<Facility> = body
            .elements
            .into_iter()
            .filter_map(|element| element.into_facility(&origin))
            .collect();
        let ranked = rank_facilities(candidates, self.config.max_results);

        info!(
            "Found {} facilities near ({}, {}) from {} elements",
            ranked.len(),
            origin.latitude,
            origin.longitude,
            total
        );
        Ok(ranked)
    }
}

/// Overpass API 响应
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>, // way/relation 的中心点
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(GeoPoint::new(lat, lon)),
            (_, _, Some(center)) => Some(GeoPoint::new(center.lat, center.lon)),
            _ => None,
        }
    }

    fn tag(&self, key: &str) -> Option<String> {
        self.tags
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn address(&self) -> String {
        if let Some(full) = self.tag("addr:full") {
            return full;
        }

        let street = match (self.tag("addr:housenumber"), self.tag("addr:street")) {
            (Some(number), Some(street)) => Some(format!("{} {}", number, street)),
            (None, Some(street)) => Some(street),
            _ => None,
        };

        let parts: Vec<String> = [street, self.tag("addr:city"), self.tag("addr:postcode")]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            ADDRESS_NOT_AVAILABLE.to_string()
        } else {
            parts.join(", ")
        }
    }

    /// 转换为机构记录，无名称或无坐标的元素丢弃
    fn into_facility(self, origin: &GeoPoint) -> Option<Facility> {
        let name = self.tag("name")?;
        let position = self.position()?;
        let distance_km = haversine_km(origin, &position);
        let opening_hours = self.tag("opening_hours");

        Some(Facility {
            address: self.address(),
            phone: self
                .tag("phone")
                .or_else(|| self.tag("contact:phone"))
                .unwrap_or_else(|| PHONE_NOT_AVAILABLE.to_string()),
            rating: None,
            distance: format_distance(distance_km),
            distance_km,
            lat: Some(position.latitude),
            lon: Some(position.longitude),
            amenity: self.tag("amenity"),
            emergency: self.tag("emergency"),
            // 只能可靠识别全天候营业
            is_open: opening_hours.as_deref().and_then(|h| (h == "24/7").then_some(true)),
            opening_hours,
            name,
        })
    }
}

/// 离线模式下使用的固定机构列表
pub struct StaticFacilityProvider {
    max_results: usize,
}

impl StaticFacilityProvider {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    fn facility(name: &str, address: &str, phone: &str, rating: f64, distance_km: f64) -> Facility {
        Facility {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            rating: Some(rating),
            distance: format!("{:.1} km", distance_km),
            distance_km,
            lat: None,
            lon: None,
            amenity: Some("hospital".to_string()),
            emergency: None,
            opening_hours: None,
            is_open: None,
        }
    }
}

#[async_trait]
impl FacilityProvider for StaticFacilityProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn nearby(&self, origin: GeoPoint) -> Result<Vec<Facility>> {
        debug!(
            "Facility lookup disabled, returning static list for ({}, {})",
            origin.latitude, origin.longitude
        );

        let facilities = vec![
            Self::facility("City General Hospital", "123 Medical Center Dr, City, State", "+1-555-0123", 4.2, 0.8),
            Self::facility("Emergency Care Center", "456 Health Ave, City, State", "+1-555-0456", 4.0, 1.2),
            Self::facility("Regional Medical Center", "789 Hospital Blvd, City, State", "+1-555-0789", 4.5, 2.1),
        ];

        Ok(rank_facilities(facilities, self.max_results))
    }
}
