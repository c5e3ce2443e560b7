use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::{Map, Value as JsonValue};

use crate::gpx_types::*;

/// Convert parsed GPX data to a GeoJSON FeatureCollection.
///
/// Features come in a fixed order: one LineString per track, then one per
/// route, then one Point per waypoint. Document metadata is carried as a
/// top-level `properties` member.
pub fn to_feature_collection(data: &GpxData) -> FeatureCollection {
    let mut features = Vec::new();

    for trk in &data.tracks {
        let props = path_props(
            &trk.name,
            &trk.cmt,
            &trk.desc,
            &trk.src,
            &trk.number,
            &trk.link,
            &trk.track_type,
        );
        features.push(line_feature(&trk.points, props));
    }

    for rte in &data.routes {
        let props = path_props(
            &rte.name,
            &rte.cmt,
            &rte.desc,
            &rte.src,
            &rte.number,
            &rte.link,
            &rte.route_type,
        );
        features.push(line_feature(&rte.points, props));
    }

    for wpt in &data.waypoints {
        features.push(waypoint_to_feature(wpt));
    }

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "properties".to_string(),
        to_json(&data.metadata),
    );

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

/// Convert parsed GPX data to GeoJSON text.
pub fn to_geojson_string(data: &GpxData) -> serde_json::Result<String> {
    serde_json::to_string(&to_feature_collection(data))
}

fn line_feature(points: &[GpxPoint], props: Map<String, JsonValue>) -> Feature {
    let coords: Vec<Vec<f64>> = points.iter().map(point_coords).collect();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(coords))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn waypoint_to_feature(pt: &GpxPoint) -> Feature {
    let mut props = Map::new();
    insert_str(&mut props, "name", &pt.name);
    insert_str(&mut props, "cmt", &pt.cmt);
    insert_str(&mut props, "desc", &pt.desc);

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(point_coords(pt)))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Build the [lon, lat, ele] coordinate array.
fn point_coords(pt: &GpxPoint) -> Vec<f64> {
    vec![pt.lon, pt.lat, pt.elevation()]
}

fn path_props(
    name: &str,
    cmt: &str,
    desc: &str,
    src: &str,
    number: &str,
    link: &GpxLink,
    path_type: &str,
) -> Map<String, JsonValue> {
    let mut props = Map::new();
    insert_str(&mut props, "name", name);
    insert_str(&mut props, "cmt", cmt);
    insert_str(&mut props, "desc", desc);
    insert_str(&mut props, "src", src);
    insert_str(&mut props, "number", number);
    props.insert("link".to_string(), to_json(link));
    insert_str(&mut props, "type", path_type);
    props
}

/// Serialize a model record as a JSON object value.
fn to_json<T: serde::Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or_default()
}

fn insert_str(props: &mut Map<String, JsonValue>, key: &str, value: &str) {
    props.insert(key.to_string(), JsonValue::String(value.to_string()));
}
