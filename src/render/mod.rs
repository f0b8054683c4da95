// src/render/mod.rs
//! Рендер карты
//!
//! Композиция слоёв на растровом холсте: облако точек, страны, маркеры.
//! Все входы рендера — явные параметры; между вызовами состояние не
//! разделяется, каждое изображение рисуется на свежем холсте.

pub mod png;

pub use png::MapCanvas;

use crate::boundary::BoundarySet;
use crate::config::RenderParams;
use crate::marker::MarkerPath;
use crate::projection::{ProjectedPlace, Viewport};

/// Разбирает цвет `"#rrggbb"` в компоненты RGB
///
/// Возвращает `None` для строк в другом формате.
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Слой маркеров: города, форма и заливка
#[derive(Debug, Clone, Copy)]
pub struct MarkerLayer<'a> {
    pub places: &'a [ProjectedPlace],
    pub shape: &'a MarkerPath,
    /// Заливка маркера в формате `"#rrggbb"`
    pub fill: &'a str,
}

/// Рендерит одно изображение карты и сохраняет его в PNG
///
/// Порядок слоёв снизу вверх: облако точек → страны → маркеры. Ошибка
/// записи файла отдаётся наверх.
pub fn render_map(
    boundaries: &BoundarySet,
    viewport: &Viewport,
    markers: Option<MarkerLayer<'_>>,
    scatter: Option<&[(f64, f64)]>,
    params: &RenderParams,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = MapCanvas::new(params.width, params.height);

    if let Some(points) = scatter {
        canvas.draw_scatter(points, viewport, &params.scatter);
    }
    canvas.draw_boundaries(boundaries, viewport, &params.style);
    if let Some(layer) = markers {
        canvas.draw_markers(layer, viewport, &params.marker);
    }

    canvas.save_as_png(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ff0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#4682b4"), Some([70, 130, 180]));
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color(""), None);
    }
}
