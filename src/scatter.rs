// src/scatter.rs
//! Отладочное облако точек
//!
//! Равномерные случайные точки в заданных габаритах. Сид фиксирует облако:
//! один и тот же сид даёт одинаковые точки от запуска к запуску.

use rand::{Rng, SeedableRng};

/// Генерирует детерминированное облако точек в габаритах `(x_min, y_min, x_max, y_max)`
///
/// Для вырожденных габаритов возвращает пустой список.
#[must_use]
pub fn generate_scatter(seed: u64, count: usize, bounds: (f64, f64, f64, f64)) -> Vec<(f64, f64)> {
    let (x_min, y_min, x_max, y_max) = bounds;
    if x_max <= x_min || y_max <= y_min {
        return Vec::new();
    }

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.gen_range(x_min..x_max), rng.gen_range(y_min..y_max)))
        .collect()
}
