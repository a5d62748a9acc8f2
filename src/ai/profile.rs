//! Summary length tiers and the bounds they map to.

/// Verbosity tier requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthTier {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthTier {
    /// Resolve a free-form tier name. Unknown or missing names fall back to `Medium`.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("short") => LengthTier::Short,
            Some("long") => LengthTier::Long,
            _ => LengthTier::Medium,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LengthTier::Short => "short",
            LengthTier::Medium => "medium",
            LengthTier::Long => "long",
        }
    }
}

/// Min/max bounds for per-chunk (map) and final (reduce) summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthProfile {
    pub map_max: u32,
    pub map_min: u32,
    pub reduce_max: u32,
    pub reduce_min: u32,
}

const SHORT: LengthProfile = LengthProfile {
    map_max: 120,
    map_min: 40,
    reduce_max: 140,
    reduce_min: 50,
};

const MEDIUM: LengthProfile = LengthProfile {
    map_max: 180,
    map_min: 60,
    reduce_max: 200,
    reduce_min: 70,
};

const LONG: LengthProfile = LengthProfile {
    map_max: 200,
    map_min: 80,
    reduce_max: 250,
    reduce_min: 90,
};

impl LengthProfile {
    #[must_use]
    pub fn for_tier(tier: LengthTier) -> Self {
        match tier {
            LengthTier::Short => SHORT,
            LengthTier::Medium => MEDIUM,
            LengthTier::Long => LONG,
        }
    }

    /// Shorthand for `for_tier(LengthTier::resolve(raw))`.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        Self::for_tier(LengthTier::resolve(raw))
    }
}
