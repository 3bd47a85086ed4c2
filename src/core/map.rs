// Station map payload

use crate::core::constants::{MAP_CENTER, MAP_ZOOM, STATION_COORDS};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StationMap {
    pub center: MapPoint,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// One labeled marker per station over the fixed base map viewport. Pure
/// function of the static coordinate table; never touches the dataset.
pub fn station_map() -> StationMap {
    let markers = STATION_COORDS
        .iter()
        .map(|&(name, lat, lon)| MapMarker {
            label: name.to_string(),
            lat,
            lon,
        })
        .collect();

    StationMap {
        center: MapPoint {
            lat: MAP_CENTER.0,
            lon: MAP_CENTER.1,
        },
        zoom: MAP_ZOOM,
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_marker_per_station() {
        let map = station_map();
        assert_eq!(map.markers.len(), STATION_COORDS.len());
        for (marker, &(name, lat, lon)) in map.markers.iter().zip(&STATION_COORDS) {
            assert_eq!(marker.label, name);
            assert_eq!(marker.lat, lat);
            assert_eq!(marker.lon, lon);
        }
    }

    #[test]
    fn test_viewport() {
        let map = station_map();
        assert_eq!(map.center.lat, 39.9042);
        assert_eq!(map.center.lon, 116.4074);
        assert_eq!(map.zoom, 10);
    }
}
