//! Export of the reconstructed graph

mod to_geojson;
