use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a planner's random number generator.
///
/// A 128-bit (16-byte) seed that fully determines every random draw a
/// planner makes: population initialization, mutation, tournament
/// selection, and opponent sampling. Reusing a seed against a
/// deterministic forward model replays a decision exactly, enabling
/// reproducible debugging and recorded matches.
///
/// Serializes as a 32-character hex string, and parses back from one.
///
/// # Example
///
/// ```
/// use rhea_planner::PlannerSeed;
/// use rand::Rng as _;
///
/// let seed: PlannerSeed = rand::rng().random();
/// let replay: PlannerSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed.to_string(), replay.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerSeed([u8; 16]);

impl PlannerSeed {
    /// Wraps raw seed bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// The raw seed bytes, in the layout `rand_pcg::Pcg32::from_seed`
    /// expects.
    #[must_use]
    pub fn into_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PlannerSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Raised when a seed string is not 32 hex characters.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed {text:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    text: String,
}

impl FromStr for PlannerSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PlannerSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlannerSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<PlannerSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PlannerSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PlannerSeed(seed)
    }
}
