// src/marker.rs
//! Построение формы маркера-булавки
//!
//! Маркер — замкнутый контур в локальных координатах с осью Y вверх и якорем
//! в начале координат: при штамповке остриё булавки совпадает с точкой
//! города. Два независимых способа построения:
//!
//! 1. **Встроенная капля** — пять контрольных точек с явным масштабом,
//!    два «плеча» квадратичными кривыми через вершину головки и замыкание
//!    обратно к острию.
//! 2. **Контур из SVG-иконки** — первый путь документа, нормализованный
//!    чистой функцией [`normalize_pin_outline`]: центрирование на центроиде →
//!    поворот на 180° → вертикальный сдвиг. Порядок шагов фиксирован,
//!    перестановка смещает якорь.
//!
//! Замкнутость и самопересечения загруженного контура не проверяются.

use usvg::tiny_skia_path::PathSegment;

/// Команда контура маркера
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    /// Квадратичная кривая: контрольная точка, затем конечная
    QuadTo(f32, f32, f32, f32),
    /// Кубическая кривая: две контрольные точки, затем конечная
    CubicTo(f32, f32, f32, f32, f32, f32),
    Close,
}

/// Замкнутый контур маркера
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerPath {
    pub commands: Vec<PathCommand>,
}

impl MarkerPath {
    /// Обходит все вершины контура, включая контрольные точки кривых
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.commands.iter().flat_map(|command| match *command {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => vec![(x, y)],
            PathCommand::QuadTo(cx, cy, x, y) => vec![(cx, cy), (x, y)],
            PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                vec![(c1x, c1y), (c2x, c2y), (x, y)]
            }
            PathCommand::Close => vec![],
        })
    }

    /// Среднее всех вершин контура
    #[must_use]
    pub fn centroid(&self) -> (f32, f32) {
        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        let mut count = 0.0f32;
        for (x, y) in self.points() {
            sum_x += x;
            sum_y += y;
            count += 1.0;
        }
        if count == 0.0 {
            (0.0, 0.0)
        } else {
            (sum_x / count, sum_y / count)
        }
    }

    /// Габариты контура: `(min_x, min_y, max_x, max_y)`, `None` для пустого
    #[must_use]
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let mut bounds: Option<(f32, f32, f32, f32)> = None;
        for (x, y) in self.points() {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        bounds
    }

    /// Высота контура (0.0 для пустого)
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bounds().map_or(0.0, |(_, min_y, _, max_y)| max_y - min_y)
    }

    /// Сдвигает контур
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        self.map_points(|x, y| (x + dx, y + dy))
    }

    /// Поворачивает контур на 180° вокруг начала координат
    #[must_use]
    pub fn rotated_half_turn(&self) -> Self {
        self.map_points(|x, y| (-x, -y))
    }

    fn map_points(&self, f: impl Fn(f32, f32) -> (f32, f32)) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(x, y) => {
                    let (x, y) = f(x, y);
                    PathCommand::MoveTo(x, y)
                }
                PathCommand::LineTo(x, y) => {
                    let (x, y) = f(x, y);
                    PathCommand::LineTo(x, y)
                }
                PathCommand::QuadTo(cx, cy, x, y) => {
                    let (cx, cy) = f(cx, cy);
                    let (x, y) = f(x, y);
                    PathCommand::QuadTo(cx, cy, x, y)
                }
                PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                    let (c1x, c1y) = f(c1x, c1y);
                    let (c2x, c2y) = f(c2x, c2y);
                    let (x, y) = f(x, y);
                    PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y)
                }
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }
}

/// Капля из пяти контрольных точек
///
/// Остриё в начале координат, головка на высоте `70 × scale`.
#[must_use]
pub fn teardrop_marker(scale: f32) -> MarkerPath {
    MarkerPath {
        commands: vec![
            PathCommand::MoveTo(0.0, 0.0),
            PathCommand::QuadTo(-40.0 * scale, 60.0 * scale, 0.0, 70.0 * scale),
            PathCommand::QuadTo(40.0 * scale, 60.0 * scale, 0.0, 0.0),
            PathCommand::Close,
        ],
    }
}

/// Нормализует сырой контур иконки в якорно-корректный маркер
///
/// Последовательность фиксирована: центрирование на центроиде вершин →
/// поворот на 180° → вертикальный сдвиг. Поворот переводит контур из
/// экранных координат SVG (ось Y вниз) в локальные координаты маркера
/// (ось Y вверх); сдвиг равен расстоянию от центроида до нижней точки
/// исходного контура, поэтому остриё после преобразования попадает точно в
/// начало координат, а не в центроид.
#[must_use]
pub fn normalize_pin_outline(outline: &MarkerPath) -> MarkerPath {
    let Some((_, _, _, max_y)) = outline.bounds() else {
        return outline.clone();
    };
    let (cx, cy) = outline.centroid();
    // Нижняя точка иконки в координатах SVG — это максимум по Y
    let tip_offset = max_y - cy;

    outline
        .translated(-cx, -cy)
        .rotated_half_turn()
        .translated(0.0, tip_offset)
}

/// Загружает контур маркера из SVG-файла и нормализует его
///
/// Берётся первый путь документа с учётом абсолютной трансформации узла.
///
/// # Ошибки
/// Возвращает ошибку, если файл не найден, не разбирается как SVG или не
/// содержит ни одного пути.
pub fn marker_from_svg(path: &str) -> Result<MarkerPath, Box<dyn std::error::Error>> {
    let data = std::fs::read(path)?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())?;
    let svg_path = first_path(tree.root()).ok_or("SVG icon contains no path outline")?;
    Ok(normalize_pin_outline(&outline_from_usvg(svg_path)))
}

/// Ищет первый путь в дереве SVG (обход в глубину)
fn first_path(group: &usvg::Group) -> Option<&usvg::Path> {
    for node in group.children() {
        match node {
            usvg::Node::Path(path) => return Some(path.as_ref()),
            usvg::Node::Group(child) => {
                if let Some(path) = first_path(child) {
                    return Some(path);
                }
            }
            _ => {}
        }
    }
    None
}

/// Переводит сегменты usvg в контур маркера
fn outline_from_usvg(path: &usvg::Path) -> MarkerPath {
    let t = path.abs_transform();
    let apply = |p: usvg::tiny_skia_path::Point| -> (f32, f32) {
        (
            t.sx * p.x + t.kx * p.y + t.tx,
            t.ky * p.x + t.sy * p.y + t.ty,
        )
    };

    let mut commands = Vec::new();
    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                let (x, y) = apply(p);
                commands.push(PathCommand::MoveTo(x, y));
            }
            PathSegment::LineTo(p) => {
                let (x, y) = apply(p);
                commands.push(PathCommand::LineTo(x, y));
            }
            PathSegment::QuadTo(p0, p1) => {
                let (cx, cy) = apply(p0);
                let (x, y) = apply(p1);
                commands.push(PathCommand::QuadTo(cx, cy, x, y));
            }
            PathSegment::CubicTo(p0, p1, p2) => {
                let (c1x, c1y) = apply(p0);
                let (c2x, c2y) = apply(p1);
                let (x, y) = apply(p2);
                commands.push(PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y));
            }
            PathSegment::Close => commands.push(PathCommand::Close),
        }
    }
    MarkerPath { commands }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardrop_is_closed_and_anchored_at_tip() {
        let marker = teardrop_marker(1.0);
        assert_eq!(marker.commands.first(), Some(&PathCommand::MoveTo(0.0, 0.0)));
        assert_eq!(marker.commands.last(), Some(&PathCommand::Close));
        assert!((marker.height() - 70.0).abs() < 1e-6);
    }

    #[test]
    fn teardrop_scale_is_linear() {
        assert!((teardrop_marker(10.0).height() - 700.0).abs() < 1e-3);
    }

    #[test]
    fn normalize_anchors_tip_to_origin() {
        // Ромб в экранных координатах SVG (ось Y вниз); остриё — нижняя
        // вершина (2, 8), центроид вершин — (2, 4)
        let outline = MarkerPath {
            commands: vec![
                PathCommand::MoveTo(2.0, 0.0),
                PathCommand::LineTo(0.0, 4.0),
                PathCommand::LineTo(2.0, 8.0),
                PathCommand::LineTo(4.0, 4.0),
                PathCommand::Close,
            ],
        };

        let normalized = normalize_pin_outline(&outline);

        // Нижняя точка (до поворота) попадает в начало координат
        assert_eq!(normalized.commands[2], PathCommand::LineTo(0.0, 0.0));
        // Тело булавки целиком над якорем
        for (_, y) in normalized.points() {
            assert!(y >= 0.0);
        }
        // Высота контура сохраняется
        assert!((normalized.height() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_order_is_recenter_rotate_translate() {
        // Для несимметричного контура якорь по X отражается поворотом:
        // нижняя точка (3, 8) при центроиде (2.25, 4) уходит в (-0.75, 0)
        let outline = MarkerPath {
            commands: vec![
                PathCommand::MoveTo(2.0, 0.0),
                PathCommand::LineTo(0.0, 4.0),
                PathCommand::LineTo(3.0, 8.0),
                PathCommand::LineTo(4.0, 4.0),
                PathCommand::Close,
            ],
        };

        let normalized = normalize_pin_outline(&outline);
        assert_eq!(normalized.commands[2], PathCommand::LineTo(-0.75, 0.0));
    }

    #[test]
    fn normalize_keeps_empty_outline_empty() {
        let outline = MarkerPath::default();
        assert_eq!(normalize_pin_outline(&outline), outline);
    }

    #[test]
    fn centroid_includes_curve_control_points() {
        let outline = MarkerPath {
            commands: vec![
                PathCommand::MoveTo(0.0, 0.0),
                PathCommand::QuadTo(4.0, 4.0, 0.0, 8.0),
                PathCommand::Close,
            ],
        };
        let (cx, cy) = outline.centroid();
        assert!((cx - 4.0 / 3.0).abs() < 1e-6);
        assert!((cy - 4.0).abs() < 1e-6);
    }
}
