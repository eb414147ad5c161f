//! Tests for selection parsing

use crate::errors::ClipError;
use crate::selection::{BoundingBox, QueryParams, Selection, SelectionParser, Window};

#[test]
fn test_bbox_is_reordered_for_projection_window() {
    let params = QueryParams::new().with("BBOX", "10,20,30,40");
    let selection = SelectionParser::parse(&params).unwrap();

    let Selection::BoundingBox(bbox) = selection else {
        panic!("expected a bounding box selection");
    };
    assert_eq!(bbox, BoundingBox::new(10.0, 20.0, 30.0, 40.0));

    let window = bbox.projection_window();
    assert_eq!(window, Window { ulx: 10.0, uly: 40.0, lrx: 30.0, lry: 20.0 });
    assert_eq!(window.to_string(), "10,40,30,20");
    assert_eq!(window.to_args(), ["10", "40", "30", "20"]);
}

#[test]
fn test_keys_are_case_insensitive() {
    let params: QueryParams = vec![("bBoX", "1.5, 2, 3,4")].into_iter().collect();
    let selection = SelectionParser::parse(&params).unwrap();
    assert_eq!(selection, Selection::BoundingBox(BoundingBox::new(1.5, 2.0, 3.0, 4.0)));
    assert_eq!(selection.tag(), "clip");
}

#[test]
fn test_geojson_taken_verbatim() {
    let polygon = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
    let params = QueryParams::new().with("geojson", polygon);

    let selection = SelectionParser::parse(&params).unwrap();
    assert_eq!(selection, Selection::PolygonMask(polygon.to_string()));
    assert_eq!(selection.tag(), "mask");
}

#[test]
fn test_bbox_wins_over_geojson() {
    let params = QueryParams::new()
        .with("GEOJSON", "{}")
        .with("BBOX", "0,0,1,1");

    let selection = SelectionParser::parse(&params).unwrap();
    assert!(matches!(selection, Selection::BoundingBox(_)));
}

#[test]
fn test_missing_selection() {
    let params = QueryParams::new().with("format", "png");
    assert!(matches!(SelectionParser::parse(&params), Err(ClipError::MissingSelection)));

    let empty = QueryParams::new().with("BBOX", "").with("GEOJSON", "  ");
    assert!(matches!(SelectionParser::parse(&empty), Err(ClipError::MissingSelection)));
}

#[test]
fn test_malformed_bbox() {
    let short = QueryParams::new().with("BBOX", "1,2,3");
    assert!(matches!(SelectionParser::parse(&short), Err(ClipError::InvalidBoundingBox(_))));

    let text = QueryParams::new().with("BBOX", "1,2,east,4");
    match SelectionParser::parse(&text) {
        Err(ClipError::InvalidBoundingBox(msg)) => assert!(msg.contains("east")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_canonical_differs_per_selection() {
    let a = Selection::PolygonMask("{\"a\":1}".to_string());
    let b = Selection::PolygonMask("{\"b\":2}".to_string());
    assert_ne!(a.canonical(), b.canonical());
    assert_eq!(
        Selection::BoundingBox(BoundingBox::new(1.0, 2.0, 3.0, 4.0)).canonical(),
        "bbox:1,2,3,4"
    );
}

#[test]
fn test_parse_pair() {
    assert_eq!(
        QueryParams::parse_pair("geojson={\"a\":\"b=c\"}").unwrap(),
        ("geojson".to_string(), "{\"a\":\"b=c\"}".to_string())
    );
    assert!(QueryParams::parse_pair("novalue").is_err());
    assert!(QueryParams::parse_pair("=x").is_err());
}
