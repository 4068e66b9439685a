//! Geographic calculations

use crate::types::Coordinates;

/// Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate Haversine distance between two points in kilometers
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Great-circle distance matrix; `matrix[i][j]` is the distance from point i to point j
pub fn distance_matrix(points: &[Coordinates]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..n {
            if i != j {
                matrix[i][j] = haversine_distance(&points[i], &points[j]);
            }
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jakarta() -> Coordinates {
        Coordinates { lat: -6.2088, lng: 106.8456 }
    }

    fn bandung() -> Coordinates {
        Coordinates { lat: -6.9175, lng: 107.6191 }
    }

    #[test]
    fn test_haversine_jakarta_bandung() {
        let distance = haversine_distance(&jakarta(), &bandung());

        // Jakarta to Bandung is approximately 116 km in a straight line
        assert!((distance - 116.0).abs() < 5.0, "got {} km", distance);
    }

    #[test]
    fn test_haversine_same_point() {
        let point = jakarta();
        assert!(haversine_distance(&point, &point).abs() < 0.001);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let a = Coordinates { lat: 0.0, lng: 0.0 };
        let b = Coordinates { lat: 0.0, lng: 1.0 };
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((haversine_distance(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_distance_matrix() {
        let points = vec![
            jakarta(),
            bandung(),
            Coordinates { lat: -6.8168, lng: 107.1425 },
        ];

        let matrix = distance_matrix(&points);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[0].len(), 3);

        // Diagonal should be zero
        for i in 0..3 {
            assert!(matrix[i][i].abs() < 0.001);
        }

        // Should be symmetric
        assert!((matrix[0][1] - matrix[1][0]).abs() < 0.001);
    }
}
