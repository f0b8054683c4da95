// src/config.rs
//! Конфигурация рендера карт
//!
//! Этот модуль определяет все параметры, управляющие рендером карт Европы:
//! - Пути к входным файлам (shapefile границ, SVG-иконка маркера)
//! - Видимая область карты (рамка в координатах долгота/широта)
//! - Стиль отрисовки стран и маркеров городов
//! - Отладочное облако точек
//!
//! Все структуры поддерживают сериализацию в TOML для удобной настройки через
//! конфигурационные файлы. Значения по умолчанию воспроизводят исходные карты:
//! без конфигурационного файла рендер даёт тот же результат.

use serde::{Deserialize, Serialize};
use std::fs;

/// Способ построения формы маркера
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub enum MarkerStyle {
    /// Контур из SVG-иконки, нормализованный так, чтобы остриё булавки
    /// указывало точно на координату города
    #[default]
    Icon,
    /// Встроенная капля из пяти контрольных точек (не требует файла иконки)
    Teardrop,
}

/// Видимая область карты в координатах WGS84 (градусы)
///
/// Рамка пересчитывается в Web Mercator один раз и переиспользуется для всех
/// трёх изображений — кадрирование у них идентичное.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewportSettings {
    /// Западная граница, градусы долготы
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,

    /// Восточная граница, градусы долготы
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,

    /// Южная граница, градусы широты
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,

    /// Северная граница, градусы широты
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
}

fn default_lon_min() -> f64 {
    -10.0
}
fn default_lon_max() -> f64 {
    36.0
}
fn default_lat_min() -> f64 {
    35.0
}
fn default_lat_max() -> f64 {
    71.0
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            lon_min: -10.0,
            lon_max: 36.0,
            lat_min: 35.0,
            lat_max: 71.0,
        }
    }
}

/// Стиль отрисовки стран
///
/// Цвета задаются строками `"#rrggbb"`. Слой суши (заливка, штриховка и
/// кромка) рисуется с общей прозрачностью `land_alpha`, поверх него идёт
/// непрозрачный проход границ цветом `border_color`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Заливка суши
    #[serde(default = "default_land_fill")]
    pub land_fill: String,

    /// Цвет кромки суши и кружков штриховки
    #[serde(default = "default_land_edge")]
    pub land_edge: String,

    /// Прозрачность слоя суши (0.0 = невидимый, 1.0 = непрозрачный)
    #[serde(default = "default_land_alpha")]
    pub land_alpha: f32,

    /// Толщина кромки суши в пикселях
    #[serde(default = "default_land_edge_width")]
    pub land_edge_width: f32,

    /// Шаг сетки штриховки «oooo» в пикселях
    #[serde(default = "default_hatch_spacing")]
    pub hatch_spacing: f32,

    /// Радиус кружка штриховки в пикселях
    #[serde(default = "default_hatch_radius")]
    pub hatch_radius: f32,

    /// Цвет верхнего прохода границ
    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Толщина верхнего прохода границ в пикселях
    #[serde(default = "default_border_width")]
    pub border_width: f32,
}

fn default_land_fill() -> String {
    "#ffffff".to_string()
}
fn default_land_edge() -> String {
    "#808080".to_string()
}
fn default_land_alpha() -> f32 {
    0.6
}
fn default_land_edge_width() -> f32 {
    4.0
}
fn default_hatch_spacing() -> f32 {
    28.0
}
fn default_hatch_radius() -> f32 {
    4.0
}
fn default_border_color() -> String {
    "#ffffff".to_string()
}
fn default_border_width() -> f32 {
    8.0
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            land_fill: default_land_fill(),
            land_edge: default_land_edge(),
            land_alpha: 0.6,
            land_edge_width: 4.0,
            hatch_spacing: 28.0,
            hatch_radius: 4.0,
            border_color: default_border_color(),
            border_width: 8.0,
        }
    }
}

/// Настройки маркеров городов
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSettings {
    /// Способ построения формы маркера (по умолчанию из SVG-иконки)
    #[serde(default)]
    pub style: MarkerStyle,

    /// Высота штампа маркера в пикселях
    #[serde(default = "default_marker_size")]
    pub size: f32,

    /// Заливка маркеров домашних институтов
    #[serde(default = "default_home_color")]
    pub home_color: String,

    /// Заливка маркеров партнёров
    #[serde(default = "default_partner_color")]
    pub partner_color: String,

    /// Цвет окантовки маркера
    #[serde(default = "default_marker_edge")]
    pub edge_color: String,

    /// Толщина окантовки маркера в пикселях
    #[serde(default = "default_marker_edge_width")]
    pub edge_width: f32,
}

fn default_marker_size() -> f32 {
    120.0
}
fn default_home_color() -> String {
    "#ff0000".to_string()
}
fn default_partner_color() -> String {
    // steelblue
    "#4682b4".to_string()
}
fn default_marker_edge() -> String {
    "#ffffff".to_string()
}
fn default_marker_edge_width() -> f32 {
    4.0
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            style: MarkerStyle::Icon,
            size: 120.0,
            home_color: default_home_color(),
            partner_color: default_partner_color(),
            edge_color: default_marker_edge(),
            edge_width: 4.0,
        }
    }
}

/// Отладочное облако точек
///
/// Равномерные случайные точки в габаритах отфильтрованных границ,
/// детерминированные по сиду. По умолчанию выключено и на итоговых картах
/// не появляется.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterSettings {
    /// Включает отрисовку облака
    #[serde(default)]
    pub enabled: bool,

    /// Сид генератора случайных чисел (детерминированное облако)
    #[serde(default)]
    pub seed: u64,

    /// Количество точек
    #[serde(default = "default_scatter_count")]
    pub count: usize,

    /// Цвет точек
    #[serde(default = "default_scatter_color")]
    pub color: String,

    /// Радиус точки в пикселях
    #[serde(default = "default_scatter_radius")]
    pub radius: i32,
}

fn default_scatter_count() -> usize {
    200_000
}
fn default_scatter_color() -> String {
    "#808080".to_string()
}
fn default_scatter_radius() -> i32 {
    1
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            seed: 0,
            count: 200_000,
            color: default_scatter_color(),
            radius: 1,
        }
    }
}

/// Основные параметры рендера
///
/// Полная конфигурация для построения трёх карт. Поддерживает загрузку из
/// TOML-файлов; любое поле можно опустить.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderParams {
    /// Путь к shapefile границ стран (Natural Earth, 1:110m admin 0)
    #[serde(default = "default_shapefile")]
    pub shapefile: String,

    /// Путь к SVG-иконке маркера
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Ширина изображения в пикселях (по умолчанию 3600 = 12″ × 300 dpi)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота изображения в пикселях
    #[serde(default = "default_height")]
    pub height: u32,

    /// Имя файла карты домашних институтов
    #[serde(default = "default_output_home")]
    pub output_home: String,

    /// Имя файла карты партнёров
    #[serde(default = "default_output_partners")]
    pub output_partners: String,

    /// Имя файла подложки без маркеров
    #[serde(default = "default_output_base")]
    pub output_base: String,

    /// Страны, исключаемые из европейского набора
    ///
    /// Удалённые и несмежные территории растягивают кадр, поэтому
    /// выбрасываются по имени ещё до проекции.
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,

    /// Видимая область карты
    #[serde(default)]
    pub viewport: ViewportSettings,

    /// Стиль отрисовки стран
    #[serde(default)]
    pub style: StyleSettings,

    /// Настройки маркеров
    #[serde(default)]
    pub marker: MarkerSettings,

    /// Отладочное облако точек
    #[serde(default)]
    pub scatter: ScatterSettings,
}

impl RenderParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Аргументы
    /// * `path` - путь к файлу конфигурации в формате TOML
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл не найден или содержит недопустимый формат.
    ///
    /// # Пример
    /// ```toml
    /// # render.toml
    /// width = 1800
    /// height = 1800
    ///
    /// [marker]
    /// style = "Teardrop"
    /// ```
    ///
    /// ```no_run
    /// let params = pinmap::RenderParams::from_toml_file("render.toml").unwrap();
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        Ok(params)
    }
}

fn default_shapefile() -> String {
    "ne_110m_admin_0_countries.shp".to_string()
}
fn default_icon() -> String {
    "map-pin.svg".to_string()
}
fn default_width() -> u32 {
    3600
}
fn default_height() -> u32 {
    3600
}
fn default_output_home() -> String {
    "europe_map.png".to_string()
}
fn default_output_partners() -> String {
    "europe_map_partners.png".to_string()
}
fn default_output_base() -> String {
    "europe_map_pins.png".to_string()
}
fn default_excluded() -> Vec<String> {
    vec![
        "Russia".to_string(),
        "Greenland".to_string(),
        "French Guiana".to_string(),
    ]
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            shapefile: default_shapefile(),
            icon: default_icon(),
            width: 3600,
            height: 3600,
            output_home: default_output_home(),
            output_partners: default_output_partners(),
            output_base: default_output_base(),
            excluded: default_excluded(),
            viewport: ViewportSettings::default(),
            style: StyleSettings::default(),
            marker: MarkerSettings::default(),
            scatter: ScatterSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_maps() {
        let params = RenderParams::default();
        assert_eq!(params.shapefile, "ne_110m_admin_0_countries.shp");
        assert_eq!(params.icon, "map-pin.svg");
        assert_eq!(params.width, 3600);
        assert_eq!(params.height, 3600);
        assert_eq!(params.excluded, vec!["Russia", "Greenland", "French Guiana"]);
        assert_eq!(
            params.viewport,
            ViewportSettings {
                lon_min: -10.0,
                lon_max: 36.0,
                lat_min: 35.0,
                lat_max: 71.0,
            }
        );
        assert!(!params.scatter.enabled);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let params: RenderParams = toml::from_str("").unwrap();
        assert_eq!(params.output_home, "europe_map.png");
        assert_eq!(params.output_partners, "europe_map_partners.png");
        assert_eq!(params.output_base, "europe_map_pins.png");
        assert_eq!(params.marker.home_color, "#ff0000");
        assert_eq!(params.marker.partner_color, "#4682b4");
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let toml_src = "width = 1200\n\n[marker]\nstyle = \"Teardrop\"\n";
        let params: RenderParams = toml::from_str(toml_src).unwrap();
        assert_eq!(params.width, 1200);
        assert_eq!(params.height, 3600);
        assert!(matches!(params.marker.style, MarkerStyle::Teardrop));
        assert_eq!(params.marker.size, 120.0);
    }
}
