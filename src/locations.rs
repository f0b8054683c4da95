// src/locations.rs
//! Координаты институтов (WGS84)
//!
//! Два независимых набора городов: домашние институты и партнёры. Один и тот
//! же город может входить в оба набора — на картах он помечается в каждом
//! независимо.

/// Именованная точка на карте
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    /// Широта в градусах
    pub lat: f64,
    /// Долгота в градусах
    pub lon: f64,
}

/// Домашние институты
pub const HOME_LOCATIONS: &[Location] = &[
    Location { name: "Dresden", lat: 51.0504, lon: 13.7373 },
    Location { name: "Ljubljana", lat: 46.0569, lon: 14.5058 },
    Location { name: "München", lat: 48.1351, lon: 11.5820 },
    Location { name: "Manchester", lat: 53.4808, lon: -2.2426 },
    Location { name: "Leuven", lat: 50.8798, lon: 4.7005 },
    Location { name: "Groningen", lat: 53.2194, lon: 6.5665 },
    Location { name: "Louvain-la-Neuve", lat: 50.6683, lon: 4.6114 },
    Location { name: "Bergen", lat: 60.3913, lon: 5.3221 },
    Location { name: "Turin", lat: 45.0703, lon: 7.6869 },
    Location { name: "Mailand", lat: 45.4642, lon: 9.1900 },
    Location { name: "Navarra", lat: 42.8125, lon: -1.6458 },
    Location { name: "Aarhus", lat: 56.1629, lon: 10.2039 },
    Location { name: "Stockholm", lat: 59.3293, lon: 18.0686 },
    Location { name: "Villigen", lat: 47.533333, lon: 8.216667 },
    Location { name: "Bern", lat: 46.948056, lon: 7.4475 },
];

/// Институты-партнёры
pub const PARTNER_LOCATIONS: &[Location] = &[
    Location { name: "Boston", lat: 42.35843, lon: -71.05977 },
    Location { name: "Delft", lat: 52.00667, lon: 4.35556 },
    Location { name: "Wien", lat: 48.20849, lon: 16.37208 },
    Location { name: "Ljubljana", lat: 46.0569, lon: 14.5058 },
    Location { name: "Zürich", lat: 47.36667, lon: 8.55 },
    Location { name: "Erlangen", lat: 49.59099, lon: 11.00783 },
    Location { name: "Darmstadt", lat: 49.87167, lon: 8.65027 },
    Location { name: "München", lat: 48.1351, lon: 11.5820 },
    Location { name: "Stockholm", lat: 59.3293, lon: 18.0686 },
    Location { name: "Pavia", lat: 45.19205, lon: 9.15917 },
    Location { name: "Turin", lat: 45.07049, lon: 7.68682 },
    Location { name: "Heidelberg", lat: 49.40768, lon: 8.69079 },
    Location { name: "Bergen", lat: 60.3913, lon: 5.3221 },
    Location { name: "Trondheim", lat: 63.43049, lon: 10.39506 },
    Location { name: "Villigen", lat: 47.533333, lon: 8.216667 },
    Location { name: "Brüssel", lat: 50.85045, lon: 4.34878 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_collections_are_nonempty_and_disjoint_objects() {
        assert_eq!(HOME_LOCATIONS.len(), 15);
        assert_eq!(PARTNER_LOCATIONS.len(), 16);
    }

    #[test]
    fn shared_cities_have_identical_coordinates() {
        // Города, входящие в оба набора, должны совпадать по координатам
        for home in HOME_LOCATIONS {
            if let Some(partner) = PARTNER_LOCATIONS.iter().find(|p| p.name == home.name) {
                assert!((partner.lat - home.lat).abs() < 1e-3, "{}", home.name);
                assert!((partner.lon - home.lon).abs() < 1e-3, "{}", home.name);
            }
        }
    }
}
