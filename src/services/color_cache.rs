//! Memoizing cache for conversions, contrast and blending.
//!
//! Keys are built from quantized colors (three decimal places), so colors
//! that differ only by floating-point jitter share an entry. On a miss the
//! typed helpers compute from the key's representative color, which makes
//! every cached value a pure function of its key: whichever caller fills an
//! entry first, everyone reads the same number.
//!
//! Each category is an independent LRU map behind its own mutex. A full
//! category drops its least recently used quarter before inserting.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lumen_color::{
    blend, contrast_ratio_from_luminance, interpolate, relative_luminance, BlendMode, Color, Hsl,
    InterpolationSpace, Lab, QUANTIZATION_SCALE,
};

use crate::models::CacheConfig;

/// Quantized `[r, g, b, a]` in thousandths.
pub type ColorKey = [i32; 4];

/// Groups of cache entries that can be cleared independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    Hsl,
    Lab,
    Luminance,
    Contrast,
    Blend,
    Interpolation,
}

impl CacheCategory {
    pub const ALL: [CacheCategory; 6] = [
        CacheCategory::Hsl,
        CacheCategory::Lab,
        CacheCategory::Luminance,
        CacheCategory::Contrast,
        CacheCategory::Blend,
        CacheCategory::Interpolation,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Identity of one cached computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Hsl(ColorKey),
    Lab(ColorKey),
    Luminance(ColorKey),
    /// Stored with the smaller key first; contrast is symmetric
    Contrast(ColorKey, ColorKey),
    /// Top, then bottom
    Blend(ColorKey, ColorKey, BlendMode),
    /// From, to, space, then t in thousandths
    Interpolation(ColorKey, ColorKey, InterpolationSpace, i32),
}

impl CacheKey {
    pub fn hsl(color: Color) -> Self {
        CacheKey::Hsl(color.quantized_components())
    }

    pub fn lab(color: Color) -> Self {
        CacheKey::Lab(color.quantized_components())
    }

    pub fn luminance(color: Color) -> Self {
        CacheKey::Luminance(color.quantized_components())
    }

    /// Order-normalized: `contrast(a, b) == contrast(b, a)`.
    pub fn contrast(a: Color, b: Color) -> Self {
        let (a, b) = (a.quantized_components(), b.quantized_components());
        if a <= b {
            CacheKey::Contrast(a, b)
        } else {
            CacheKey::Contrast(b, a)
        }
    }

    pub fn blend(top: Color, bottom: Color, mode: BlendMode) -> Self {
        CacheKey::Blend(top.quantized_components(), bottom.quantized_components(), mode)
    }

    pub fn interpolation(from: Color, to: Color, t: f64, space: InterpolationSpace) -> Self {
        CacheKey::Interpolation(
            from.quantized_components(),
            to.quantized_components(),
            space,
            quantize_t(t),
        )
    }

    pub fn category(&self) -> CacheCategory {
        match self {
            CacheKey::Hsl(_) => CacheCategory::Hsl,
            CacheKey::Lab(_) => CacheCategory::Lab,
            CacheKey::Luminance(_) => CacheCategory::Luminance,
            CacheKey::Contrast(..) => CacheCategory::Contrast,
            CacheKey::Blend(..) => CacheCategory::Blend,
            CacheKey::Interpolation(..) => CacheCategory::Interpolation,
        }
    }
}

fn quantize_t(t: f64) -> i32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    (t * QUANTIZATION_SCALE + 1e-6).floor() as i32
}

/// A cached result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachedValue {
    Hsl(Hsl),
    Lab(Lab),
    /// Luminance or contrast ratio
    Scalar(f64),
    /// Blend or interpolation result
    Color(Color),
}

impl CachedValue {
    fn fits(&self, category: CacheCategory) -> bool {
        matches!(
            (self, category),
            (CachedValue::Hsl(_), CacheCategory::Hsl)
                | (CachedValue::Lab(_), CacheCategory::Lab)
                | (CachedValue::Scalar(_), CacheCategory::Luminance)
                | (CachedValue::Scalar(_), CacheCategory::Contrast)
                | (CachedValue::Color(_), CacheCategory::Blend)
                | (CachedValue::Color(_), CacheCategory::Interpolation)
        )
    }
}

/// Hit/miss counters and current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

struct Entry {
    value: CachedValue,
    last_used: u64,
}

/// One category's LRU map.
struct CategoryStore {
    entries: HashMap<CacheKey, Entry>,
    tick: u64,
}

impl CategoryStore {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            tick: 0,
        }
    }

    fn get(&mut self, key: &CacheKey) -> Option<CachedValue> {
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(entry.value)
    }

    fn store(&mut self, key: CacheKey, value: CachedValue, capacity: usize) {
        if !self.entries.contains_key(&key) && self.entries.len() >= capacity {
            self.evict(capacity);
        }
        self.tick += 1;
        self.entries.insert(
            key,
            Entry {
                value,
                last_used: self.tick,
            },
        );
    }

    /// Drop the least recently used quarter (at least one entry).
    fn evict(&mut self, capacity: usize) {
        let count = (capacity / 4).max(1);
        let mut by_age: Vec<(u64, CacheKey)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.last_used, *key))
            .collect();
        by_age.sort_unstable_by_key(|(last_used, _)| *last_used);
        for (_, key) in by_age.into_iter().take(count) {
            self.entries.remove(&key);
        }
        tracing::debug!(
            evicted = count,
            remaining = self.entries.len(),
            "Color cache: evicted least recently used entries"
        );
    }
}

/// Thread-safe, bounded memoization of color computations.
///
/// Construct one and share it through `Arc`; there is no global instance.
///
/// ```
/// use lumen::color::Color;
/// use lumen::ColorCache;
///
/// let cache = ColorCache::default();
/// let ratio = cache.contrast_ratio(Color::WHITE, Color::BLACK);
/// assert!((ratio - 21.0).abs() < 1e-9);
/// assert_eq!(cache.contrast_ratio(Color::BLACK, Color::WHITE), ratio);
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct ColorCache {
    categories: [Mutex<CategoryStore>; 6],
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ColorCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_capacity(config.clone().normalized().max_entries_per_category)
    }

    /// Create a cache holding at most `capacity` entries per category.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            categories: std::array::from_fn(|_| Mutex::new(CategoryStore::new())),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A panic while holding the lock leaves the map itself intact, since
    /// entries are inserted whole.
    fn lock(&self, category: CacheCategory) -> MutexGuard<'_, CategoryStore> {
        self.categories[category.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity_per_category(&self) -> usize {
        self.capacity
    }

    /// Look up a cached value. A miss means "recompute", never an error.
    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let value = self.lock(key.category()).get(key);
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Store a value, replacing any previous one. Values of the wrong kind
    /// for the key's category are dropped.
    pub fn put(&self, key: CacheKey, value: CachedValue) {
        let category = key.category();
        if !value.fits(category) {
            tracing::debug!(?key, ?value, "Color cache: dropped value of mismatched kind");
            return;
        }
        self.lock(category).store(key, value, self.capacity);
    }

    fn memoize<T: Copy>(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> T,
        wrap: fn(T) -> CachedValue,
        unwrap: fn(CachedValue) -> Option<T>,
    ) -> T {
        if let Some(value) = self.get(&key).and_then(unwrap) {
            return value;
        }
        // Computed outside the lock; racing callers compute the same value
        let value = compute();
        self.put(key, wrap(value));
        value
    }

    /// HSL of the color's grid representative.
    ///
    /// Equal to `color.to_hsl()` for colors on the three-decimal grid. For
    /// off-grid colors it is the HSL of `color.quantized()`, so it can differ
    /// from the direct conversion in the fourth decimal of a channel.
    pub fn hsl(&self, color: Color) -> Hsl {
        let representative = color.quantized();
        self.memoize(
            CacheKey::hsl(color),
            || representative.to_hsl(),
            CachedValue::Hsl,
            |v| match v {
                CachedValue::Hsl(hsl) => Some(hsl),
                _ => None,
            },
        )
    }

    /// LAB of the color's grid representative.
    ///
    /// Equal to `color.to_lab()` for on-grid colors; for off-grid colors it
    /// is `color.quantized().to_lab()`, a small delta E away.
    pub fn lab(&self, color: Color) -> Lab {
        let representative = color.quantized();
        self.memoize(
            CacheKey::lab(color),
            || representative.to_lab(),
            CachedValue::Lab,
            |v| match v {
                CachedValue::Lab(lab) => Some(lab),
                _ => None,
            },
        )
    }

    /// Relative luminance of the color's grid representative.
    ///
    /// Equal to the direct `relative_luminance(color)` for on-grid colors
    /// only. Callers needing the exact value for an arbitrary color should
    /// compute it directly.
    pub fn luminance(&self, color: Color) -> f64 {
        let representative = color.quantized();
        self.memoize(
            CacheKey::luminance(color),
            || relative_luminance(representative),
            CachedValue::Scalar,
            scalar,
        )
    }

    /// Contrast ratio between the grid representatives of `a` and `b`.
    pub fn contrast_ratio(&self, a: Color, b: Color) -> f64 {
        self.memoize(
            CacheKey::contrast(a, b),
            || contrast_ratio_from_luminance(self.luminance(a), self.luminance(b)),
            CachedValue::Scalar,
            scalar,
        )
    }

    /// Blend of the grid representatives of `top` over `bottom`.
    pub fn blend(&self, top: Color, bottom: Color, mode: BlendMode) -> Color {
        self.memoize(
            CacheKey::blend(top, bottom, mode),
            || blend(top.quantized(), bottom.quantized(), mode),
            CachedValue::Color,
            color,
        )
    }

    /// Interpolation between grid representatives, with `t` on the same grid.
    pub fn interpolate(&self, from: Color, to: Color, t: f64, space: InterpolationSpace) -> Color {
        let key = CacheKey::interpolation(from, to, t, space);
        let t_grid = f64::from(quantize_t(t)) / QUANTIZATION_SCALE;
        self.memoize(
            key,
            || interpolate(from.quantized(), to.quantized(), t_grid, space),
            CachedValue::Color,
            color,
        )
    }

    /// Drop every entry. Safe to call while other threads use the cache.
    pub fn clear(&self) {
        for category in CacheCategory::ALL {
            self.lock(category).entries.clear();
        }
        tracing::debug!("Color cache: cleared");
    }

    /// Drop the entries of one category.
    pub fn clear_category(&self, category: CacheCategory) {
        let mut store = self.lock(category);
        let dropped = store.entries.len();
        store.entries.clear();
        tracing::debug!(?category, dropped, "Color cache: cleared category");
    }

    pub fn len(&self) -> usize {
        CacheCategory::ALL
            .into_iter()
            .map(|category| self.lock(category).entries.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

fn scalar(value: CachedValue) -> Option<f64> {
    match value {
        CachedValue::Scalar(v) => Some(v),
        _ => None,
    }
}

fn color(value: CachedValue) -> Option<Color> {
    match value {
        CachedValue::Color(c) => Some(c),
        _ => None,
    }
}
