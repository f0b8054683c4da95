// src/projection.rs
//! Проекция Web Mercator (семантика EPSG:3857)
//!
//! Чистая математика без привязки к растеризатору: перевод координат WGS84 в
//! метры меркатора и окно просмотра, общее для всех изображений.

use crate::locations::Location;

/// Радиус сферы Web Mercator в метрах
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Предел широты проекции: ближе к полюсам тангенс уходит в бесконечность
pub const MAX_LATITUDE_DEG: f64 = 85.051_13;

/// Переводит долготу/широту (градусы WGS84) в метры Web Mercator
///
/// Широта ограничивается пределом проекции, долгота не нормализуется.
///
/// # Пример
/// ```
/// let (x, y) = pinmap::projection::lon_lat_to_mercator(0.0, 0.0);
/// assert!(x.abs() < 1e-9);
/// assert!(y.abs() < 1e-9);
/// ```
#[must_use]
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG);
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M
        * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
            .tan()
            .ln();
    (x, y)
}

/// Город с координатами в проекции карты
#[derive(Debug, Clone)]
pub struct ProjectedPlace {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Проецирует набор городов в метры меркатора
#[must_use]
pub fn project_locations(locations: &[Location]) -> Vec<ProjectedPlace> {
    locations
        .iter()
        .map(|location| {
            let (x, y) = lon_lat_to_mercator(location.lon, location.lat);
            ProjectedPlace {
                name: location.name.to_string(),
                x,
                y,
            }
        })
        .collect()
}

/// Окно просмотра в метрах меркатора
///
/// Вычисляется один раз из фиксированной рамки долгота/широта и передаётся в
/// каждый вызов рендера: все изображения получают идентичное кадрирование.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Строит окно из рамки долгота/широта (градусы)
    #[must_use]
    pub fn from_lon_lat(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        let (x_min, y_min) = lon_lat_to_mercator(lon_min, lat_min);
        let (x_max, y_max) = lon_lat_to_mercator(lon_max, lat_max);
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Переводит точку проекции в пиксели изображения
    ///
    /// Ось Y переворачивается: в проекции север наверху (y растёт вверх),
    /// в изображении строки идут сверху вниз.
    #[must_use]
    pub fn to_pixel(&self, x: f64, y: f64, width: u32, height: u32) -> (f32, f32) {
        let px = (x - self.x_min) / (self.x_max - self.x_min) * f64::from(width);
        let py = (self.y_max - y) / (self.y_max - self.y_min) * f64::from(height);
        (px as f32, py as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mercator_antimeridian_matches_reference() {
        // Полуокружность экватора: πR
        let (x, y) = lon_lat_to_mercator(180.0, 0.0);
        assert!((x - 20_037_508.342_789_244).abs() < 1e-6);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn latitude_is_clamped_to_projection_limit() {
        let (_, y_pole) = lon_lat_to_mercator(0.0, 90.0);
        let (_, y_limit) = lon_lat_to_mercator(0.0, MAX_LATITUDE_DEG);
        assert!(y_pole.is_finite());
        assert!((y_pole - y_limit).abs() < 1e-9);
    }

    #[test]
    fn viewport_from_fixed_box_is_reproducible() {
        let a = Viewport::from_lon_lat(-10.0, 35.0, 36.0, 71.0);
        let b = Viewport::from_lon_lat(-10.0, 35.0, 36.0, 71.0);
        assert_eq!(a, b);
    }

    #[test]
    fn to_pixel_maps_viewport_corners() {
        let viewport = Viewport::from_lon_lat(-10.0, 35.0, 36.0, 71.0);

        let (px, py) = viewport.to_pixel(viewport.x_min, viewport.y_max, 3600, 3600);
        assert!(px.abs() < 1e-3);
        assert!(py.abs() < 1e-3);

        let (px, py) = viewport.to_pixel(viewport.x_max, viewport.y_min, 3600, 3600);
        assert!((px - 3600.0).abs() < 1e-3);
        assert!((py - 3600.0).abs() < 1e-3);
    }

    #[test]
    fn project_locations_keeps_labels() {
        let places = project_locations(crate::locations::HOME_LOCATIONS);
        assert_eq!(places.len(), 15);
        assert_eq!(places[0].name, "Dresden");
        // Дрезден восточнее нулевого меридиана и севернее экватора
        assert!(places[0].x > 0.0);
        assert!(places[0].y > 0.0);
    }
}
