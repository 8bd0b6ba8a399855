// The outlines of the states, as a GeoJSON feature collection.

use serde::{Deserialize, Serialize};

use crate::story::io_common::simplify_file_name;
use crate::story::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct FeatureProperties {
    name: String,
}

// Positions may carry a third (altitude) coordinate, which is dropped.
type Position = Vec<f64>;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum FeatureGeometry {
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

pub fn read_states(path: &str) -> BStoryResult<Vec<StateFeature>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let res = parse_states(&contents, path)?;
    info!(
        "read_states: {} states in {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

pub fn parse_states(contents: &str, path: &str) -> BStoryResult<Vec<StateFeature>> {
    let fc: FeatureCollection =
        serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    let mut res: Vec<StateFeature> = Vec::new();
    for f in fc.features.into_iter() {
        let name = f.properties.name;
        let geometry = match f.geometry {
            FeatureGeometry::Polygon(rings) => Geometry::Polygon(read_rings(&rings, &name)?),
            FeatureGeometry::MultiPolygon(polys) => {
                let mut l: Vec<Vec<Vec<Point>>> = Vec::new();
                for rings in polys.iter() {
                    l.push(read_rings(rings, &name)?);
                }
                Geometry::MultiPolygon(l)
            }
        };
        if geometry.first_ring().map_or(true, |r| r.is_empty()) {
            warn!("parse_states: {} has an empty outline", name);
        }
        res.push(StateFeature { name, geometry });
    }
    Ok(res)
}

fn read_rings(rings: &[Vec<Position>], name: &str) -> BStoryResult<Vec<Vec<Point>>> {
    let mut res: Vec<Vec<Point>> = Vec::new();
    for ring in rings.iter() {
        let mut points: Vec<Point> = Vec::new();
        for pos in ring.iter() {
            match pos.as_slice() {
                [x, y, ..] => points.push([*x, *y]),
                _ => return Err(Box::new(StoryError::GeoJsonGeometry { name: name.to_string() })),
            }
        }
        res.push(points);
    }
    Ok(res)
}
