use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::warn;

/// 1-based index of the catalog slice a participant draws images from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cohort(u32);

impl Cohort {
    pub fn new(index: u32, count: u32) -> Option<Self> {
        (1..=count).contains(&index).then_some(Self(index))
    }

    /// Uniformly random cohort in `1..=count`
    pub fn random<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Self {
        Self(rng.random_range(1..=count.max(1)))
    }

    /// Resolves the `ffp` query value. Missing, non-numeric or out-of-range
    /// values fall back to a random cohort.
    pub fn from_query_value<R: Rng + ?Sized>(value: Option<&str>, count: u32, rng: &mut R) -> Self {
        let parsed = value.and_then(parse_int_prefix);
        match parsed
            .and_then(|v| u32::try_from(v).ok())
            .and_then(|v| Self::new(v, count))
        {
            Some(cohort) => cohort,
            None => {
                let cohort = Self::random(count, rng);
                warn!(
                    value = value.unwrap_or("<missing>"),
                    fallback = cohort.0,
                    "invalid ffp, using random cohort"
                );
                cohort
            }
        }
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    /// Catalog range `[(c-1)*size, c*size)`
    pub fn range(&self, size: usize) -> Range<usize> {
        let start = (self.0 as usize - 1) * size;
        start..start + size
    }
}

/// Leading integer of `s`, read the way `parseInt(s, 10)` reads it
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
