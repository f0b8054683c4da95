// src/render/png.rs
//! Растеризация карты в PNG
//!
//! Холст — непрозрачный RGBA-буфер `image`. Векторные слои (страны, маркеры)
//! рисуются через tiny-skia поверх того же буфера, облако точек — через
//! imageproc. Сохранение отдаёт ошибку записи наверх, пустой или битый файл
//! не появляется молча.

use geo_types::Coord;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use tiny_skia::{
    FillRule, IntSize, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap, Stroke,
    Transform,
};

use crate::boundary::BoundarySet;
use crate::config::{MarkerSettings, ScatterSettings, StyleSettings};
use crate::marker::{MarkerPath, PathCommand};
use crate::projection::Viewport;
use crate::render::{MarkerLayer, parse_hex_color};

/// Холст карты фиксированного размера
pub struct MapCanvas {
    pub width: u32,
    pub height: u32,
    img: RgbaImage,
}

impl MapCanvas {
    /// Создаёт белый непрозрачный холст
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            img: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
        }
    }

    /// Пропускает буфер через `Pixmap` tiny-skia и копирует результат обратно
    ///
    /// Буфер всегда непрозрачный, поэтому premultiplied-представление
    /// совпадает с обычным и конвертация без потерь.
    fn with_pixmap(&mut self, f: impl FnOnce(&mut Pixmap)) {
        let Some(size) = IntSize::from_wh(self.width, self.height) else {
            return;
        };
        let Some(mut pixmap) = Pixmap::from_vec(self.img.as_raw().clone(), size) else {
            return;
        };

        f(&mut pixmap);

        self.img.copy_from_slice(pixmap.data());
    }

    /// Рисует страны: заливка, штриховка кружками, кромка и верхний проход границ
    pub fn draw_boundaries(
        &mut self,
        boundaries: &BoundarySet,
        viewport: &Viewport,
        style: &StyleSettings,
    ) {
        let Some(land) = build_land_path(boundaries, viewport, self.width, self.height) else {
            return;
        };
        let alpha = (style.land_alpha.clamp(0.0, 1.0) * 255.0) as u8;
        let fill = parse_hex_color(&style.land_fill).unwrap_or([255, 255, 255]);
        let edge = parse_hex_color(&style.land_edge).unwrap_or([128, 128, 128]);
        let border = parse_hex_color(&style.border_color).unwrap_or([255, 255, 255]);
        let (width, height) = (self.width, self.height);

        self.with_pixmap(|pixmap| {
            let mut paint = Paint::default();
            paint.anti_alias = true;

            // 1. Полупрозрачная заливка суши
            paint.set_color_rgba8(fill[0], fill[1], fill[2], alpha);
            pixmap.fill_path(&land, &paint, FillRule::EvenOdd, Transform::identity(), None);

            // 2. Штриховка «oooo»: сетка кружков, обрезанная по маске суши
            if let Some(circles) = hatch_grid(width, height, style.hatch_spacing, style.hatch_radius)
                && let Some(mask) = land_mask(&land, width, height)
            {
                paint.set_color_rgba8(edge[0], edge[1], edge[2], alpha);
                let stroke = Stroke {
                    width: style.land_edge_width * 0.5,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&circles, &paint, &stroke, Transform::identity(), Some(&mask));
            }

            // 3. Кромка суши
            paint.set_color_rgba8(edge[0], edge[1], edge[2], alpha);
            let stroke = Stroke {
                width: style.land_edge_width,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&land, &paint, &stroke, Transform::identity(), None);

            // 4. Верхний проход границ
            paint.set_color_rgba8(border[0], border[1], border[2], 255);
            let stroke = Stroke {
                width: style.border_width,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&land, &paint, &stroke, Transform::identity(), None);
        });
    }

    /// Рисует облако точек
    pub fn draw_scatter(
        &mut self,
        points: &[(f64, f64)],
        viewport: &Viewport,
        settings: &ScatterSettings,
    ) {
        let color = parse_hex_color(&settings.color).unwrap_or([128, 128, 128]);
        let pixel = Rgba([color[0], color[1], color[2], 255]);

        for &(x, y) in points {
            let (px, py) = viewport.to_pixel(x, y, self.width, self.height);
            // Точки за кадром пропускаем
            if px < 0.0 || py < 0.0 || px >= self.width as f32 || py >= self.height as f32 {
                continue;
            }
            draw_filled_circle_mut(&mut self.img, (px as i32, py as i32), settings.radius, pixel);
        }
    }

    /// Штампует маркеры городов поверх границ
    pub fn draw_markers(
        &mut self,
        layer: MarkerLayer<'_>,
        viewport: &Viewport,
        settings: &MarkerSettings,
    ) {
        let marker_height = layer.shape.height();
        if marker_height <= 0.0 {
            return;
        }
        let scale = settings.size / marker_height;
        let fill = parse_hex_color(layer.fill).unwrap_or([255, 0, 0]);
        let edge = parse_hex_color(&settings.edge_color).unwrap_or([255, 255, 255]);
        let (width, height) = (self.width, self.height);

        self.with_pixmap(|pixmap| {
            let mut fill_paint = Paint::default();
            fill_paint.anti_alias = true;
            fill_paint.set_color_rgba8(fill[0], fill[1], fill[2], 255);

            let mut edge_paint = Paint::default();
            edge_paint.anti_alias = true;
            edge_paint.set_color_rgba8(edge[0], edge[1], edge[2], 255);

            let stroke = Stroke {
                width: settings.edge_width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };

            for place in layer.places {
                let (px, py) = viewport.to_pixel(place.x, place.y, width, height);
                let Some(path) = stamp_path(layer.shape, scale, px, py) else {
                    continue;
                };
                pixmap.fill_path(&path, &fill_paint, FillRule::Winding, Transform::identity(), None);
                pixmap.stroke_path(&path, &edge_paint, &stroke, Transform::identity(), None);
            }
        });
    }

    /// Сохраняет холст в PNG
    pub fn save_as_png(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.img.save(path)?;
        Ok(())
    }
}

/// Собирает общий контур всех колец стран в пиксельных координатах
fn build_land_path(
    boundaries: &BoundarySet,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for country in &boundaries.countries {
        for polygon in &country.polygons {
            add_ring(&mut builder, &polygon.exterior, viewport, width, height);
            for hole in &polygon.holes {
                add_ring(&mut builder, hole, viewport, width, height);
            }
        }
    }
    builder.finish()
}

fn add_ring(
    builder: &mut PathBuilder,
    ring: &[Coord<f64>],
    viewport: &Viewport,
    width: u32,
    height: u32,
) {
    let mut first = true;
    for coord in ring {
        let (px, py) = viewport.to_pixel(coord.x, coord.y, width, height);
        if first {
            builder.move_to(px, py);
            first = false;
        } else {
            builder.line_to(px, py);
        }
    }
    if !first {
        builder.close();
    }
}

/// Маска суши для обрезки штриховки
fn land_mask(land: &Path, width: u32, height: u32) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(land, FillRule::EvenOdd, true, Transform::identity());
    Some(mask)
}

/// Сетка кружков штриховки на весь холст
fn hatch_grid(width: u32, height: u32, spacing: f32, radius: f32) -> Option<Path> {
    if spacing <= 0.0 || radius <= 0.0 {
        return None;
    }

    let mut builder = PathBuilder::new();
    let mut y = spacing * 0.5;
    while y < height as f32 {
        let mut x = spacing * 0.5;
        while x < width as f32 {
            builder.push_circle(x, y, radius);
            x += spacing;
        }
        y += spacing;
    }
    builder.finish()
}

/// Контур маркера, отмасштабированный и перенесённый к точке города
///
/// Локальная ось Y маркера направлена вверх, при переносе в пиксели она
/// переворачивается: тело булавки встаёт над точкой якоря.
fn stamp_path(shape: &MarkerPath, scale: f32, px: f32, py: f32) -> Option<Path> {
    let tx = |x: f32| px + x * scale;
    let ty = |y: f32| py - y * scale;

    let mut builder = PathBuilder::new();
    for command in &shape.commands {
        match *command {
            PathCommand::MoveTo(x, y) => builder.move_to(tx(x), ty(y)),
            PathCommand::LineTo(x, y) => builder.line_to(tx(x), ty(y)),
            PathCommand::QuadTo(cx, cy, x, y) => builder.quad_to(tx(cx), ty(cy), tx(x), ty(y)),
            PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                builder.cubic_to(tx(c1x), ty(c1y), tx(c2x), ty(c2y), tx(x), ty(y));
            }
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}
