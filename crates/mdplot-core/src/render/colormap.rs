use phf::phf_map;
use plotters::style::RGBColor;

/// Matplotlib viridis, sampled at eight anchor points.
static VIRIDIS_STOPS: [(u8, u8, u8); 8] = [
    (68, 1, 84),
    (70, 50, 126),
    (54, 92, 141),
    (39, 127, 142),
    (31, 161, 135),
    (74, 193, 109),
    (160, 218, 57),
    (253, 231, 37),
];

/// ColorBrewer RdBu, red for low values through white to blue.
static RDBU_STOPS: [(u8, u8, u8); 11] = [
    (103, 0, 31),
    (178, 24, 43),
    (214, 96, 77),
    (244, 165, 130),
    (253, 219, 199),
    (247, 247, 247),
    (209, 229, 240),
    (146, 197, 222),
    (67, 147, 195),
    (33, 102, 172),
    (5, 48, 97),
];

/// RdBu reversed: blue for anticorrelated, red for correlated motion.
static RDBU_R_STOPS: [(u8, u8, u8); 11] = [
    (5, 48, 97),
    (33, 102, 172),
    (67, 147, 195),
    (146, 197, 222),
    (209, 229, 240),
    (247, 247, 247),
    (253, 219, 199),
    (244, 165, 130),
    (214, 96, 77),
    (178, 24, 43),
    (103, 0, 31),
];

/// Orange-to-dark-red ramp for free-energy surfaces on white backgrounds.
static DARK_YLORRD_STOPS: [(u8, u8, u8); 7] = [
    (255, 165, 0),
    (255, 140, 0),
    (255, 127, 0),
    (255, 99, 71),
    (255, 69, 0),
    (220, 20, 60),
    (139, 0, 0),
];

static GRAYSCALE_STOPS: [(u8, u8, u8); 2] = [(0, 0, 0), (255, 255, 255)];

static BUILTIN_COLORMAPS: phf::Map<&'static str, Colormap> = phf_map! {
    "viridis" => Colormap { stops: &VIRIDIS_STOPS },
    "rdbu" => Colormap { stops: &RDBU_STOPS },
    "rdbu-r" => Colormap { stops: &RDBU_R_STOPS },
    "dark-ylorrd" => Colormap { stops: &DARK_YLORRD_STOPS },
    "grayscale" => Colormap { stops: &GRAYSCALE_STOPS },
};

/// A gradient defined by evenly spaced color stops, sampled by normalized
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    stops: &'static [(u8, u8, u8)],
}

impl Colormap {
    pub const VIRIDIS: Colormap = Colormap {
        stops: &VIRIDIS_STOPS,
    };

    /// Looks up a built-in colormap by its registry name.
    pub fn by_name(name: &str) -> Option<Self> {
        BUILTIN_COLORMAPS.get(name).copied()
    }

    /// Registry names of all built-in colormaps.
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN_COLORMAPS.keys().copied()
    }

    /// Color at normalized position `t` in `[0, 1]`. Out-of-range and
    /// non-finite positions clamp to the nearest end.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (self.stops.len() - 1) as f64;
        let index = (scaled.floor() as usize).min(self.stops.len() - 2);
        let fraction = scaled - index as f64;

        let (r0, g0, b0) = self.stops[index];
        let (r1, g1, b1) = self.stops[index + 1];
        let lerp = |a: u8, b: u8| (a as f64 + fraction * (b as f64 - a as f64)).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// Color for `value` normalized into `range`. A degenerate range maps
    /// everything to the middle of the gradient.
    pub fn sample_in(&self, value: f64, range: (f64, f64)) -> RGBColor {
        let (low, high) = range;
        let span = high - low;
        if !(span > 0.0) {
            return self.sample(0.5);
        }
        self.sample((value - low) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        let map = Colormap::by_name("viridis").unwrap();
        assert_eq!(map.sample(0.0), RGBColor(68, 1, 84));
        assert_eq!(map.sample(1.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn midpoint_interpolates_between_stops() {
        let map = Colormap::by_name("grayscale").unwrap();
        assert_eq!(map.sample(0.5), RGBColor(128, 128, 128));
    }

    #[test]
    fn out_of_range_positions_clamp() {
        let map = Colormap::by_name("grayscale").unwrap();
        assert_eq!(map.sample(-2.0), map.sample(0.0));
        assert_eq!(map.sample(7.0), map.sample(1.0));
        assert_eq!(map.sample(f64::NAN), map.sample(0.0));
    }

    #[test]
    fn sample_in_normalizes_against_range() {
        let map = Colormap::by_name("grayscale").unwrap();
        assert_eq!(map.sample_in(-1.0, (-1.0, 1.0)), map.sample(0.0));
        assert_eq!(map.sample_in(0.0, (-1.0, 1.0)), map.sample(0.5));
        assert_eq!(map.sample_in(1.0, (-1.0, 1.0)), map.sample(1.0));
    }

    #[test]
    fn degenerate_range_maps_to_gradient_middle() {
        let map = Colormap::by_name("grayscale").unwrap();
        assert_eq!(map.sample_in(3.0, (2.0, 2.0)), map.sample(0.5));
    }

    #[test]
    fn rdbu_r_is_rdbu_reversed() {
        let forward = Colormap::by_name("rdbu").unwrap();
        let reversed = Colormap::by_name("rdbu-r").unwrap();
        assert_eq!(forward.sample(0.0), reversed.sample(1.0));
        assert_eq!(forward.sample(1.0), reversed.sample(0.0));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(Colormap::by_name("plasma").is_none());
        assert!(Colormap::by_name("").is_none());
    }

    #[test]
    fn registry_lists_all_builtins() {
        let names: Vec<_> = Colormap::names().collect();
        assert!(names.contains(&"viridis"));
        assert!(names.contains(&"rdbu-r"));
        assert!(names.contains(&"dark-ylorrd"));
    }
}
