// src/boundary/mod.rs
//! Набор границ стран
//!
//! Полигоны стран с атрибутами имени и континента. Валидность геометрии
//! наследуется от исходного файла и не проверяется.

pub mod loader;

use geo_types::Coord;
use rayon::prelude::*;

use crate::projection::lon_lat_to_mercator;

/// Полигон страны: внешнее кольцо и дырки
#[derive(Debug, Clone)]
pub struct CountryPolygon {
    pub exterior: Vec<Coord<f64>>,
    pub holes: Vec<Vec<Coord<f64>>>,
}

/// Страна из набора границ
#[derive(Debug, Clone)]
pub struct Country {
    pub name: String,
    pub continent: String,
    pub polygons: Vec<CountryPolygon>,
}

/// Набор границ стран
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    pub countries: Vec<Country>,
}

impl BoundarySet {
    /// Читает набор границ из shapefile (вместе с атрибутами `.dbf`)
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл отсутствует или в атрибутах нет колонок
    /// `NAME` / `CONTINENT`.
    pub fn from_shapefile(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            countries: loader::load_countries(path)?,
        })
    }

    /// Оставляет страны континента, кроме перечисленных по имени
    #[must_use]
    pub fn filter_continent(&self, continent: &str, excluded: &[String]) -> Self {
        let countries = self
            .countries
            .iter()
            .filter(|country| {
                country.continent == continent && !excluded.iter().any(|name| name == &country.name)
            })
            .cloned()
            .collect();
        Self { countries }
    }

    /// Перепроецирует все вершины из WGS84 в Web Mercator
    #[must_use]
    pub fn to_web_mercator(&self) -> Self {
        let countries = self
            .countries
            .par_iter()
            .map(|country| Country {
                name: country.name.clone(),
                continent: country.continent.clone(),
                polygons: country
                    .polygons
                    .iter()
                    .map(|polygon| CountryPolygon {
                        exterior: project_ring(&polygon.exterior),
                        holes: polygon.holes.iter().map(|hole| project_ring(hole)).collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { countries }
    }

    /// Общий габарит всех вершин: `(x_min, y_min, x_max, y_max)`
    #[must_use]
    pub fn total_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for coord in self
            .countries
            .iter()
            .flat_map(|country| &country.polygons)
            .flat_map(|polygon| {
                polygon
                    .exterior
                    .iter()
                    .chain(polygon.holes.iter().flatten())
            })
        {
            bounds = Some(match bounds {
                None => (coord.x, coord.y, coord.x, coord.y),
                Some((x_min, y_min, x_max, y_max)) => (
                    x_min.min(coord.x),
                    y_min.min(coord.y),
                    x_max.max(coord.x),
                    y_max.max(coord.y),
                ),
            });
        }
        bounds
    }
}

fn project_ring(ring: &[Coord<f64>]) -> Vec<Coord<f64>> {
    ring.iter()
        .map(|coord| {
            let (x, y) = lon_lat_to_mercator(coord.x, coord.y);
            Coord { x, y }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, continent: &str) -> Country {
        Country {
            name: name.to_string(),
            continent: continent.to_string(),
            polygons: vec![CountryPolygon {
                exterior: vec![
                    Coord { x: 0.0, y: 0.0 },
                    Coord { x: 1.0, y: 0.0 },
                    Coord { x: 1.0, y: 1.0 },
                    Coord { x: 0.0, y: 1.0 },
                ],
                holes: Vec::new(),
            }],
        }
    }

    #[test]
    fn filter_excludes_named_countries_and_other_continents() {
        let world = BoundarySet {
            countries: vec![
                country("France", "Europe"),
                country("Russia", "Europe"),
                country("Greenland", "North America"),
                country("Egypt", "Africa"),
            ],
        };
        let excluded = vec!["Russia".to_string(), "Greenland".to_string()];

        let europe = world.filter_continent("Europe", &excluded);

        let names: Vec<&str> = europe.countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France"]);
    }

    #[test]
    fn filter_retains_unlisted_europe_countries() {
        let world = BoundarySet {
            countries: vec![country("France", "Europe"), country("Norway", "Europe")],
        };
        let europe = world.filter_continent("Europe", &[]);
        assert_eq!(europe.countries.len(), 2);
    }

    #[test]
    fn reprojection_keeps_geometry_structure() {
        let mut world = BoundarySet {
            countries: vec![country("France", "Europe")],
        };
        world.countries[0].polygons[0]
            .holes
            .push(vec![Coord { x: 0.4, y: 0.4 }, Coord { x: 0.6, y: 0.6 }]);

        let projected = world.to_web_mercator();

        assert_eq!(projected.countries.len(), 1);
        assert_eq!(projected.countries[0].polygons[0].exterior.len(), 4);
        assert_eq!(projected.countries[0].polygons[0].holes[0].len(), 2);
        // Нулевая точка проекции остаётся нулевой
        let origin = projected.countries[0].polygons[0].exterior[0];
        assert!(origin.x.abs() < 1e-9);
        assert!(origin.y.abs() < 1e-9);
    }

    #[test]
    fn total_bounds_covers_all_vertices() {
        let world = BoundarySet {
            countries: vec![country("France", "Europe"), country("Norway", "Europe")],
        };
        let bounds = world.total_bounds().unwrap();
        assert_eq!(bounds, (0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn total_bounds_of_empty_set_is_none() {
        assert!(BoundarySet::default().total_bounds().is_none());
    }
}
