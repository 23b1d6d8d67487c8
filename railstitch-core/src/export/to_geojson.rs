use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde_json::json;

use crate::{Error, GraphModel, NodeId, WayId};

impl GraphModel {
    /// Converts the ways and stops to a `GeoJSON` `FeatureCollection`.
    ///
    /// Ways become `LineString` features in ascending id order, followed
    /// by one `Point` feature per stop.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.way_count() + self.stops().len());

        for way_id in self.way_ids() {
            features.push(self.way_feature(way_id)?);
        }
        for &stop in self.stops() {
            features.push(self.stop_feature(stop)?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    fn way_feature(&self, way_id: WayId) -> Result<Feature, Error> {
        let way = self.way(way_id).ok_or(Error::UnknownWay(way_id))?;
        let line = LineString::new(self.way_coordinates(way_id)?);
        let geometry = Geometry::new(GeometryValue::from(&line));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "kind": "way",
                "way_id": way.id,
                "length_m": way.length,
                "synthetic": way.is_synthetic(),
                "node_count": way.nodes.len(),
            }
        });

        feature_from_json(value)
    }

    fn stop_feature(&self, node_id: NodeId) -> Result<Feature, Error> {
        let node = self.node(node_id).ok_or(Error::UnknownNode(node_id))?;
        let geometry = Geometry::new(GeometryValue::from(&node.geometry));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "kind": "stop",
                "node_id": node.id,
                "role": "stop",
            }
        });

        feature_from_json(value)
    }
}

fn feature_from_json(value: serde_json::Value) -> Result<Feature, Error> {
    serde_json::from_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use geojson::GeometryValue;
    use serde_json::json;

    use crate::GraphModel;
    use crate::model::fixtures::{node, relation_with_stops, way};

    #[test]
    fn ways_and_stops_become_features() {
        let graph = GraphModel::build(vec![
            node(1, 52.0, 13.0),
            node(2, 52.001, 13.0),
            node(3, 52.002, 13.001),
            way(10, &[1, 2, 3]),
            relation_with_stops(7, &[1, 3]),
        ]);

        let collection = graph.to_geojson().unwrap();
        assert_eq!(collection.features.len(), 3);

        let value = serde_json::to_value(&collection).unwrap();
        let way = &value["features"][0];
        assert_eq!(way["geometry"]["type"], "LineString");
        assert_eq!(way["properties"]["way_id"], 10);
        assert_eq!(way["properties"]["synthetic"], false);
        assert_eq!(way["properties"]["node_count"], 3);
        assert_eq!(way["geometry"]["coordinates"][2], json!([13.001, 52.002]));

        let stop = &value["features"][2];
        assert_eq!(stop["geometry"]["type"], "Point");
        assert_eq!(stop["properties"]["node_id"], 3);
        assert_eq!(stop["properties"]["role"], "stop");
    }

    #[test]
    fn features_carry_typed_geometry_and_properties() {
        let graph = GraphModel::build(vec![
            node(1, 52.0, 13.0),
            node(2, 52.001, 13.0),
            way(10, &[1, 2]),
            relation_with_stops(7, &[2]),
        ]);

        let collection = graph.to_geojson().unwrap();
        let way = &collection.features[0];
        assert!(matches!(
            way.geometry.as_ref().map(|g| &g.value),
            Some(GeometryValue::LineString { .. })
        ));
        assert_eq!(way.property("kind"), Some(&json!("way")));
        assert_eq!(way.property("node_count"), Some(&json!(2)));

        let stop = &collection.features[1];
        assert!(matches!(
            stop.geometry.as_ref().map(|g| &g.value),
            Some(GeometryValue::Point { .. })
        ));
        assert_eq!(stop.property("node_id"), Some(&json!(2)));
    }

    #[test]
    fn serializes_to_a_feature_collection() {
        let graph = GraphModel::build(Vec::new());
        let text = graph.to_geojson_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }
}
