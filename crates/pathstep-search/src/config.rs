//! Grid size bounds.

/// Smallest grid side length the session will allocate.
pub const GRID_SIZE_MIN: i32 = 10;
/// Largest grid side length the session will allocate.
pub const GRID_SIZE_MAX: i32 = 40;
/// Side length used for a fresh session.
pub const GRID_SIZE_DEFAULT: i32 = 20;

/// Bounds applied by [`Session::resize`](crate::Session::resize).
///
/// Sizes outside `[min_size, max_size]` are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub min_size: i32,
    pub max_size: i32,
    pub default_size: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_size: GRID_SIZE_MIN,
            max_size: GRID_SIZE_MAX,
            default_size: GRID_SIZE_DEFAULT,
        }
    }
}

impl GridConfig {
    /// Set the lower bound (builder). Values below 1 are raised to 1.
    pub fn with_min_size(mut self, n: i32) -> Self {
        self.min_size = n.max(1);
        self
    }

    /// Set the upper bound (builder).
    pub fn with_max_size(mut self, n: i32) -> Self {
        self.max_size = n;
        self
    }

    /// Set the initial size (builder).
    pub fn with_default_size(mut self, n: i32) -> Self {
        self.default_size = n;
        self
    }

    /// Clamp `n` into the configured bounds.
    ///
    /// A config whose bounds are inverted behaves as if `max_size` were
    /// equal to `min_size`.
    pub fn clamp(&self, n: i32) -> i32 {
        let lo = self.min_size.max(1);
        let hi = self.max_size.max(lo);
        n.clamp(lo, hi)
    }

    /// The initial size, clamped into the bounds.
    pub fn initial_size(&self) -> i32 {
        self.clamp(self.default_size)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = GridConfig::default().with_max_size(30);
        let json = serde_json::to_string(&c).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
