use serde::Serialize;

use crate::{
    geo::{MapBbox, MapPoint},
    id::RecordId,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: RecordId,
    pub name: String,
    pub pos: MapPoint,
    pub selected: bool,
}

/// Everything a renderer needs to draw the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapView {
    pub markers: Vec<Marker>,
    /// Bounds to fit the map into.
    pub bounds: Option<MapBbox>,
    pub selected: Option<RecordId>,
}

impl MapView {
    pub fn selected_marker(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.selected)
    }
}
