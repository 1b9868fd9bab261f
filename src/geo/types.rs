//! Geolocation data structures.

use serde::{Deserialize, Serialize};

/// Geolocation payload for one address, as returned by freegeoip-style JSON
/// services. All fields are optional; services differ in coverage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPayload {
    /// Address the payload describes.
    #[serde(default)]
    pub ip: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub country_code: Option<String>,
    /// Country name.
    #[serde(default)]
    pub country_name: Option<String>,
    /// Region or state name.
    #[serde(default)]
    pub region_name: Option<String>,
    /// City name.
    #[serde(default)]
    pub city: Option<String>,
    /// Latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// IANA time zone name.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl GeoPayload {
    /// Short "City, CC" style summary for display, if enough fields are set.
    pub fn summary(&self) -> Option<String> {
        match (&self.city, &self.country_code, &self.country_name) {
            (Some(city), Some(code), _) if !city.is_empty() => Some(format!("{city}, {code}")),
            (_, _, Some(country)) if !country.is_empty() => Some(country.clone()),
            (_, Some(code), _) if !code.is_empty() => Some(code.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_freegeoip_shape() {
        let json = r#"{
            "ip": "10.0.0.2",
            "country_code": "US",
            "country_name": "United States",
            "region_name": "California",
            "city": "Mountain View",
            "zip_code": "94043",
            "time_zone": "America/Los_Angeles",
            "latitude": 37.419,
            "longitude": -122.057,
            "metro_code": 807
        }"#;
        let payload: GeoPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.country_code.as_deref(), Some("US"));
        assert_eq!(payload.city.as_deref(), Some("Mountain View"));
        assert_eq!(payload.latitude, Some(37.419));
    }

    #[test]
    fn test_deserializes_sparse_payload() {
        let payload: GeoPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload, GeoPayload::default());
    }

    #[test]
    fn test_summary_prefers_city_and_code() {
        let payload = GeoPayload {
            city: Some("Mountain View".into()),
            country_code: Some("US".into()),
            country_name: Some("United States".into()),
            ..Default::default()
        };
        assert_eq!(payload.summary().as_deref(), Some("Mountain View, US"));

        let country_only = GeoPayload {
            country_name: Some("United States".into()),
            ..Default::default()
        };
        assert_eq!(country_only.summary().as_deref(), Some("United States"));

        assert!(GeoPayload::default().summary().is_none());
    }
}
