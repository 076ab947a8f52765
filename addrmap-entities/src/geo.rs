use serde::Serialize;
use std::fmt;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

/// Points closer than this to (0,0) usually indicate bad imports or geocoding.
const NULL_ISLAND_EPSILON_DEG: f64 = 0.01;

/// Geographical location on a (flat) map in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid_lat(lat: f64) -> bool {
        (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat)
    }

    pub fn is_valid_lng(lng: f64) -> bool {
        (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng)
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        let (lat, lng) = (lat.into(), lng.into());
        if Self::is_valid_lat(lat) && Self::is_valid_lng(lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn is_near_null_island(self) -> bool {
        self.lat.abs() < NULL_ISLAND_EPSILON_DEG && self.lng.abs() < NULL_ISLAND_EPSILON_DEG
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    /// The smallest box containing all points, `None` without any point.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = MapPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (sw, ne) = points.fold((first, first), |(sw, ne), pt| {
            (
                MapPoint {
                    lat: sw.lat.min(pt.lat),
                    lng: sw.lng.min(pt.lng),
                },
                MapPoint {
                    lat: ne.lat.max(pt.lat),
                    lng: ne.lng.max(pt.lng),
                },
            )
        });
        Some(Self::new(sw, ne))
    }

    pub const fn south_west(&self) -> MapPoint {
        self.sw
    }

    pub const fn north_east(&self) -> MapPoint {
        self.ne
    }
}

impl fmt::Display for MapBbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.sw, self.ne)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> MapPoint {
        MapPoint::try_from_lat_lng_deg(lat, lng).unwrap()
    }

    #[test]
    fn coordinate_ranges() {
        assert!(MapPoint::try_from_lat_lng_deg(-90, -180).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(90, 180).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(-90.000001, 0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(90.000001, 0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0, -180.000001).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0, 180.000001).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0).is_none());
    }

    #[test]
    fn null_island() {
        assert!(pt(0.0, 0.0).is_near_null_island());
        assert!(pt(0.005, -0.009).is_near_null_island());
        assert!(!pt(0.005, 0.02).is_near_null_island());
        assert!(!pt(40.0, -75.0).is_near_null_island());
    }

    #[test]
    fn enclosing_bbox() {
        assert_eq!(None, MapBbox::enclosing(vec![]));

        let single = MapBbox::enclosing(vec![pt(48.7, 9.1)]).unwrap();
        assert_eq!(single.south_west(), single.north_east());

        let bbox = MapBbox::enclosing(vec![pt(48.7, 9.1), pt(49.4, 8.4), pt(40.7, -74.0)]).unwrap();
        assert_eq!(pt(40.7, -74.0), bbox.south_west());
        assert_eq!(pt(49.4, 9.1), bbox.north_east());
    }
}
