//! Great-circle distances on WGS84 coordinates

use geo::{Distance, Haversine, Point};

/// Haversine distance between two points in meters
pub fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b)
}

/// Sum of distances between consecutive points
pub fn path_length<I>(points: I) -> f64
where
    I: IntoIterator<Item = Point<f64>>,
{
    let mut points = points.into_iter();
    let Some(mut previous) = points.next() else {
        return 0.0;
    };

    let mut length = 0.0;
    for point in points {
        length += distance(previous, point);
        previous = point;
    }
    length
}
