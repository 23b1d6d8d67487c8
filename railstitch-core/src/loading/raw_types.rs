use serde::Deserialize;

use crate::{NodeId, WayId};

/// Top level of an Overpass `out json` response.
/// Elements stay untyped here so one malformed record cannot reject the rest.
#[derive(Debug, Deserialize, Default)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

/// Single Overpass element, discriminated by its `type` field.
/// Tags and other metadata are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawElement {
    Node {
        id: NodeId,
        lat: f64,
        lon: f64,
    },
    Way {
        id: WayId,
        #[serde(default)]
        nodes: Vec<NodeId>,
    },
    Relation {
        id: i64,
        #[serde(default)]
        members: Vec<RawMember>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawMember {
    #[serde(rename = "type")]
    pub member_type: String,
    #[serde(rename = "ref")]
    pub reference: i64,
    #[serde(default)]
    pub role: String,
}

impl RawMember {
    pub fn is_stop(&self) -> bool {
        self.member_type == "node" && self.role == "stop"
    }
}
