use serde::Serialize;

/// Everything extracted from one GPX document.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GpxData {
    pub metadata: Metadata,
    pub waypoints: Vec<GpxPoint>,
    pub routes: Vec<GpxRoute>,
    pub tracks: Vec<GpxTrack>,
    /// One entry per track, filled only when section calculation is enabled.
    pub sections: Vec<Vec<SectionElement>>,
}

/// A single GPX point (used for wpt, rtept, trkpt).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpxPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub time: String,
    pub cmt: String,
    pub desc: String,
}

impl GpxPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            name: String::new(),
            lat,
            lon,
            ele: None,
            time: String::new(),
            cmt: String::new(),
            desc: String::new(),
        }
    }

    /// Elevation used in computations and exports; a missing `<ele>` counts as 0.
    pub fn elevation(&self) -> f64 {
        self.ele.unwrap_or(0.0)
    }
}

/// A GPX link element. `href` is `None` when the attribute is missing.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GpxLink {
    pub href: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub link_type: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GpxEmail {
    pub id: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GpxAuthor {
    pub name: String,
    pub email: GpxEmail,
    pub link: GpxLink,
}

/// Document-level `<metadata>`. Always present; absent elements leave empty fields.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub desc: String,
    pub time: String,
    pub author: GpxAuthor,
    pub link: GpxLink,
}

/// Total and cumulative distance in meters along a point sequence.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DistanceElement {
    pub total: f64,
    /// `cumul[i]` is the distance from the first point through point `i`.
    pub cumul: Vec<f64>,
}

/// Elevation statistics along a point sequence.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ElevationElement {
    pub max: f64,
    pub min: f64,
    /// Sum of climbs between consecutive points.
    pub pos: f64,
    /// Sum of descents between consecutive points, as a positive number.
    pub neg: f64,
    pub avg: f64,
    /// Net elevation change (climbs minus descents).
    pub abs: f64,
    /// Net change as a percentage of the total distance.
    pub slope: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SectionElement {
    pub distance: DistanceElement,
    pub elevation: ElevationElement,
}

/// A GPX route (<rte>).
#[derive(Debug, Default, Clone, Serialize)]
pub struct GpxRoute {
    pub name: String,
    pub cmt: String,
    pub desc: String,
    pub src: String,
    pub number: String,
    #[serde(rename = "type")]
    pub route_type: String,
    pub link: GpxLink,
    pub distance: DistanceElement,
    pub elevation: ElevationElement,
    pub points: Vec<GpxPoint>,
}

/// A GPX track (<trk>). Points of all `<trkseg>` children are flattened in order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GpxTrack {
    pub name: String,
    pub cmt: String,
    pub desc: String,
    pub src: String,
    pub number: String,
    #[serde(rename = "type")]
    pub track_type: String,
    pub link: GpxLink,
    pub distance: DistanceElement,
    pub elevation: ElevationElement,
    pub points: Vec<GpxPoint>,
}
