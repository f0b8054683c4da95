// src/boundary/loader.rs
//! Чтение границ стран из shapefile
//!
//! Геометрия читается из `.shp`, атрибуты `NAME` и `CONTINENT` — из парного
//! `.dbf`. Отсутствие файла или колонок — ошибка, прерывающая запуск.

use geo_types::Coord;
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Shape};

use super::{Country, CountryPolygon};

/// Загружает страны из shapefile
pub fn load_countries(path: &str) -> Result<Vec<Country>, Box<dyn std::error::Error>> {
    let mut reader = shapefile::Reader::from_path(path)?;
    let mut countries = Vec::new();

    for row in reader.iter_shapes_and_records() {
        let (shape, record) = row?;
        let name = string_field(&record, "NAME")?;
        let continent = string_field(&record, "CONTINENT")?;

        // Неполигональные фигуры в наборе границ не встречаются
        let Shape::Polygon(polygon) = shape else {
            continue;
        };

        countries.push(Country {
            name,
            continent,
            polygons: split_rings(&polygon),
        });
    }

    Ok(countries)
}

/// Достаёт строковое поле из записи `.dbf`
fn string_field(record: &Record, field: &str) -> Result<String, Box<dyn std::error::Error>> {
    match record.get(field) {
        Some(FieldValue::Character(Some(value))) => Ok(value.trim().to_string()),
        Some(FieldValue::Character(None)) => Ok(String::new()),
        Some(_) => Err(format!("attribute column {field} has unexpected type").into()),
        None => Err(format!("attribute column {field} is missing").into()),
    }
}

/// Разбивает кольца shapefile на полигоны
///
/// Дырка относится к последнему встреченному внешнему кольцу: в данных
/// Natural Earth кольца упорядочены именно так.
fn split_rings(polygon: &shapefile::Polygon) -> Vec<CountryPolygon> {
    let mut polygons: Vec<CountryPolygon> = Vec::new();

    for ring in polygon.rings() {
        let coords: Vec<Coord<f64>> = ring
            .points()
            .iter()
            .map(|point| Coord {
                x: point.x,
                y: point.y,
            })
            .collect();

        match ring {
            PolygonRing::Outer(_) => polygons.push(CountryPolygon {
                exterior: coords,
                holes: Vec::new(),
            }),
            PolygonRing::Inner(_) => {
                if let Some(last) = polygons.last_mut() {
                    last.holes.push(coords);
                }
            }
        }
    }

    polygons
}
