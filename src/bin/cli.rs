use clap::Parser;
use pinmap::locations::{HOME_LOCATIONS, PARTNER_LOCATIONS};
use pinmap::projection::project_locations;
use pinmap::render::{MarkerLayer, render_map};
use pinmap::scatter::generate_scatter;
use pinmap::{BoundarySet, MarkerStyle, RenderParams, Viewport, marker_from_svg, teardrop_marker};
use std::path::PathBuf;

/// Рендер карт Европы с маркерами институтов
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (без него — значения по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let params = match &cli.config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации из {path:?}...");
            RenderParams::from_toml_file(path.to_str().unwrap())?
        }
        None => RenderParams::default(),
    };

    println!("Чтение границ из {}...", params.shapefile);
    let world = BoundarySet::from_shapefile(&params.shapefile)?;

    let europe = world.filter_continent("Europe", &params.excluded);
    println!("Стран после фильтра: {}", europe.countries.len());

    let europe = europe.to_web_mercator();

    // Общее окно просмотра: все три карты кадрируются одинаково
    let v = &params.viewport;
    let viewport = Viewport::from_lon_lat(v.lon_min, v.lat_min, v.lon_max, v.lat_max);

    let marker = match params.marker.style {
        MarkerStyle::Icon => marker_from_svg(&params.icon)?,
        MarkerStyle::Teardrop => teardrop_marker(10.0),
    };

    let home = project_locations(HOME_LOCATIONS);
    let partners = project_locations(PARTNER_LOCATIONS);

    let scatter_points = if params.scatter.enabled {
        let bounds = europe.total_bounds().ok_or("boundary set is empty")?;
        generate_scatter(params.scatter.seed, params.scatter.count, bounds)
    } else {
        Vec::new()
    };
    let scatter = params.scatter.enabled.then_some(scatter_points.as_slice());

    println!("Рендер {}...", params.output_home);
    render_map(
        &europe,
        &viewport,
        Some(MarkerLayer {
            places: &home,
            shape: &marker,
            fill: &params.marker.home_color,
        }),
        scatter,
        &params,
        &params.output_home,
    )?;

    println!("Рендер {}...", params.output_partners);
    render_map(
        &europe,
        &viewport,
        Some(MarkerLayer {
            places: &partners,
            shape: &marker,
            fill: &params.marker.partner_color,
        }),
        scatter,
        &params,
        &params.output_partners,
    )?;

    println!("Рендер {}...", params.output_base);
    render_map(&europe, &viewport, None, scatter, &params, &params.output_base)?;

    println!("\nГотово! Три карты сохранены.");
    Ok(())
}
