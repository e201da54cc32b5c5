use crate::error::Result;
use crate::models::RouteCount;
use crate::services::charts::to_embed_json;
use askama::Template;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default public tile source (CartoDB Positron, light pastel style)
const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
const DEFAULT_TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

/// Approximate coordinates of the major Korean cities shipments arrive in.
/// Destinations outside this table are not drawn.
static CITY_COORDS: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        ("서울", (37.5665, 126.9780)),
        ("인천", (37.4563, 126.7052)),
        ("부산", (35.1796, 129.0756)),
        ("대구", (35.8714, 128.6014)),
        ("광주", (35.1595, 126.8526)),
        ("대전", (36.3504, 127.3845)),
        ("울산", (35.5384, 129.3114)),
        ("세종", (36.4800, 127.2890)),
        ("수원", (37.2636, 127.0286)),
        ("창원", (35.2270, 128.6813)),
        ("청주", (36.6424, 127.4890)),
        ("전주", (35.8242, 127.1480)),
        ("포항", (36.0190, 129.3435)),
        ("제주", (33.4996, 126.5312)),
    ])
});

/// One circle marker on the delivery map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub customer: String,
    pub destination: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileSource {
    url: String,
    attribution: String,
}

#[derive(Template)]
#[template(path = "map_embed.html")]
struct MapEmbedTemplate {
    tiles_json: String,
    markers_json: String,
}

/// Turn per-route shipment counts into map markers.
///
/// Marker radius grows with the count, `8 + count * 0.7` capped at 24 so
/// a busy route cannot cover half the country.
pub fn build_markers(rows: &[RouteCount]) -> Vec<MapMarker> {
    rows.iter()
        .filter_map(|row| {
            let (lat, lon) = CITY_COORDS.get(row.destination.as_str())?;

            Some(MapMarker {
                lat: *lat,
                lon: *lon,
                radius: f64::min(24.0, 8.0 + row.count as f64 * 0.7),
                customer: row.customer.clone(),
                destination: row.destination.clone(),
                count: row.count,
            })
        })
        .collect()
}

/// Render the self-contained Leaflet fragment for the delivery map.
///
/// The fragment is embedded as-is into the analytics dashboard and the
/// standalone map page. `tile_url` switches to an alternate tile server
/// (for Korean-language base maps); the default is CartoDB Positron.
pub fn render_embed(rows: &[RouteCount], tile_url: Option<&str>) -> Result<String> {
    let tiles = match tile_url {
        Some(url) => TileSource {
            url: url.to_string(),
            attribution: "Korean map tiles".to_string(),
        },
        None => TileSource {
            url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
        },
    };

    let template = MapEmbedTemplate {
        tiles_json: to_embed_json(&tiles)?,
        markers_json: to_embed_json(&build_markers(rows))?,
    };

    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(customer: &str, destination: &str, count: i64) -> RouteCount {
        RouteCount {
            customer: customer.to_string(),
            destination: destination.to_string(),
            count,
        }
    }

    #[test]
    fn markers_use_city_coordinates() {
        let markers = build_markers(&[route("한빛축산", "서울", 3)]);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].lat, 37.5665);
        assert_eq!(markers[0].lon, 126.9780);
        assert_eq!(markers[0].customer, "한빛축산");
        assert_eq!(markers[0].count, 3);
    }

    #[test]
    fn unknown_destinations_are_skipped() {
        let markers = build_markers(&[
            route("a", "서울", 1),
            route("b", "뉴욕", 99),
            route("c", "부산", 2),
        ]);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].destination, "서울");
        assert_eq!(markers[1].destination, "부산");
    }

    #[test]
    fn radius_grows_with_count_up_to_cap() {
        let markers = build_markers(&[
            route("a", "서울", 0),
            route("b", "부산", 10),
            route("c", "대구", 1000),
        ]);

        assert_eq!(markers[0].radius, 8.0);
        assert_eq!(markers[1].radius, 15.0);
        assert_eq!(markers[2].radius, 24.0);
    }

    #[test]
    fn embed_renders_default_tiles() {
        let html = render_embed(&[route("a", "서울", 5)], None).unwrap();

        assert!(html.contains("L.circleMarker"));
        assert!(html.contains("basemaps.cartocdn.com"));
        assert!(html.contains("setView([36.5, 127.8], 7)"));
        assert!(html.contains("서울"));
    }

    #[test]
    fn embed_uses_custom_tile_source() {
        let html = render_embed(
            &[route("a", "서울", 5)],
            Some("https://tiles.example.com/{z}/{x}/{y}.png"),
        )
        .unwrap();

        assert!(html.contains("tiles.example.com"));
        assert!(html.contains("Korean map tiles"));
        assert!(!html.contains("cartocdn"));
    }
}
