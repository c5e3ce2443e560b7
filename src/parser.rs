use crate::error::GpxParseError;
use crate::geometry::{cumulative_distance, elevation_stats, sectionize};
use crate::gpx_types::*;
use crate::options::ParseOptions;
use crate::xml_tree::{Document, Element};

type Result<T> = std::result::Result<T, GpxParseError>;

/// Parse a GPX XML string into GpxData with default options.
pub fn parse_gpx(xml: &str) -> Result<GpxData> {
    parse_gpx_with_options(xml, &ParseOptions::default())
}

/// Parse a GPX XML string into GpxData.
///
/// Only XML that cannot be read as a tree is an error. Missing GPX elements
/// become empty strings or defaults, and points without a usable `lat`/`lon`
/// are skipped.
pub fn parse_gpx_with_options(xml: &str, opts: &ParseOptions) -> Result<GpxData> {
    let doc = Document::parse(xml)?;
    let root = doc.root();

    let metadata = root
        .find_first("metadata")
        .map(|m| parse_metadata(&m))
        .unwrap_or_default();

    let waypoints: Vec<GpxPoint> = root.find_all("wpt").filter_map(|e| parse_point(&e)).collect();

    let routes: Vec<GpxRoute> = root.find_all("rte").map(|e| parse_route(&e, opts)).collect();

    let mut tracks = Vec::new();
    let mut sections = Vec::new();
    for trk in root.find_all("trk") {
        let track = parse_track(&trk, opts);
        if opts.calculate_sections && !track.points.is_empty() {
            sections.push(
                sectionize(&track.points, opts.section_length)
                    .into_iter()
                    .map(|s| s.with_precision(opts.precision))
                    .collect(),
            );
        }
        tracks.push(track);
    }

    tracing::debug!(
        waypoints = waypoints.len(),
        routes = routes.len(),
        tracks = tracks.len(),
        sections = sections.len(),
        "parsed GPX document"
    );

    Ok(GpxData {
        metadata,
        waypoints,
        routes,
        tracks,
        sections,
    })
}

/// Text of the first `tag` anywhere below `parent`, or an empty string.
fn text_of(parent: &Element<'_, '_>, tag: &str) -> String {
    parent.value_of(tag).unwrap_or_default()
}

/// Parse a numeric element or attribute value, tolerating surrounding whitespace.
/// Trailing units ("35 m"), `NaN` and infinities are rejected.
fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_metadata(elem: &Element<'_, '_>) -> Metadata {
    Metadata {
        name: text_of(elem, "name"),
        desc: text_of(elem, "desc"),
        time: text_of(elem, "time"),
        author: elem
            .find_first("author")
            .map(|a| parse_author(&a))
            .unwrap_or_default(),
        link: elem
            .find_direct("link")
            .map(|l| parse_link(&l))
            .unwrap_or_default(),
    }
}

fn parse_author(elem: &Element<'_, '_>) -> GpxAuthor {
    let email = elem
        .find_first("email")
        .map(|e| GpxEmail {
            id: e.attribute("id").map(str::to_string),
            domain: e.attribute("domain").map(str::to_string),
        })
        .unwrap_or_default();

    GpxAuthor {
        name: text_of(elem, "name"),
        email,
        link: elem
            .find_direct("link")
            .map(|l| parse_link(&l))
            .unwrap_or_default(),
    }
}

/// Parse a <link> element.
fn parse_link(elem: &Element<'_, '_>) -> GpxLink {
    GpxLink {
        href: elem.attribute("href").map(str::to_string),
        text: text_of(elem, "text"),
        link_type: text_of(elem, "type"),
    }
}

/// Parse a point element (wpt, rtept, trkpt). Returns `None` when `lat` or
/// `lon` is missing or not a number.
fn parse_point(elem: &Element<'_, '_>) -> Option<GpxPoint> {
    let coords = elem
        .attribute("lat")
        .and_then(parse_f64)
        .zip(elem.attribute("lon").and_then(parse_f64));
    let Some((lat, lon)) = coords else {
        tracing::debug!(
            element = elem.tag(),
            lat = elem.attribute("lat"),
            lon = elem.attribute("lon"),
            "skipping point without usable coordinates"
        );
        return None;
    };

    Some(GpxPoint {
        name: text_of(elem, "name"),
        ele: elem.value_of("ele").as_deref().and_then(parse_f64),
        time: text_of(elem, "time"),
        cmt: text_of(elem, "cmt"),
        desc: text_of(elem, "desc"),
        ..GpxPoint::new(lat, lon)
    })
}

/// Descriptive fields shared by <rte> and <trk>.
struct PathHeader {
    name: String,
    cmt: String,
    desc: String,
    src: String,
    number: String,
    path_type: String,
    link: GpxLink,
}

fn parse_path_header(elem: &Element<'_, '_>) -> PathHeader {
    PathHeader {
        name: text_of(elem, "name"),
        cmt: text_of(elem, "cmt"),
        desc: text_of(elem, "desc"),
        src: text_of(elem, "src"),
        number: text_of(elem, "number"),
        path_type: elem.find_direct("type").map(|t| t.text()).unwrap_or_default(),
        link: elem
            .find_direct("link")
            .map(|l| parse_link(&l))
            .unwrap_or_default(),
    }
}

/// Parse a <rte> element.
fn parse_route(elem: &Element<'_, '_>, opts: &ParseOptions) -> GpxRoute {
    let header = parse_path_header(elem);
    let points: Vec<GpxPoint> = elem.find_all("rtept").filter_map(|e| parse_point(&e)).collect();

    GpxRoute {
        name: header.name,
        cmt: header.cmt,
        desc: header.desc,
        src: header.src,
        number: header.number,
        route_type: header.path_type,
        link: header.link,
        distance: cumulative_distance(&points).with_precision(opts.precision),
        elevation: elevation_stats(&points).with_precision(opts.precision),
        points,
    }
}

/// Parse a <trk> element. Points of every <trkseg> are joined in document order.
fn parse_track(elem: &Element<'_, '_>, opts: &ParseOptions) -> GpxTrack {
    let header = parse_path_header(elem);
    let points: Vec<GpxPoint> = elem.find_all("trkpt").filter_map(|e| parse_point(&e)).collect();

    GpxTrack {
        name: header.name,
        cmt: header.cmt,
        desc: header.desc,
        src: header.src,
        number: header.number,
        track_type: header.path_type,
        link: header.link,
        distance: cumulative_distance(&points).with_precision(opts.precision),
        elevation: elevation_stats(&points).with_precision(opts.precision),
        points,
    }
}
