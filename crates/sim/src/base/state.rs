use core::fmt;

use serde::{Deserialize, Serialize};

/// The disease state of one host with respect to one strain.
///
/// `HealthState` is a compact, Copyable representation of the classic
/// compartments backed by a single byte (u8). A host holds exactly one
/// `HealthState` per strain, so the "exactly one compartment at a time"
/// invariant is guaranteed by the type rather than by convention. The
/// mapping of variants to integers is stable (S=0, E=1, I=2, R=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HealthState {
    Susceptible = 0,
    Exposed = 1,
    Infected = 2,
    Recovered = 3,
}

impl HealthState {
    /// Convert from u8 index (0-3)
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::Susceptible),
            1 => Some(Self::Exposed),
            2 => Some(Self::Infected),
            3 => Some(Self::Recovered),
            _ => None,
        }
    }

    /// Convert to the compact u8 index (0-3).
    #[inline(always)]
    pub const fn to_index(self) -> u8 {
        self as u8
    }

    /// Convert to the conventional one-letter compartment code.
    #[inline(always)]
    pub const fn to_char(self) -> char {
        match self {
            Self::Susceptible => 'S',
            Self::Exposed => 'E',
            Self::Infected => 'I',
            Self::Recovered => 'R',
        }
    }

    /// Return true if the host can acquire the strain.
    #[inline(always)]
    pub const fn is_susceptible(self) -> bool {
        matches!(self, Self::Susceptible)
    }

    /// Return true if the host carries the strain but is not yet infectious.
    #[inline(always)]
    pub const fn is_exposed(self) -> bool {
        matches!(self, Self::Exposed)
    }

    /// Return true if the host is infectious for the strain.
    #[inline(always)]
    pub const fn is_infected(self) -> bool {
        matches!(self, Self::Infected)
    }

    /// Return true if the host has cleared the strain.
    #[inline(always)]
    pub const fn is_recovered(self) -> bool {
        matches!(self, Self::Recovered)
    }
}

impl From<HealthState> for u8 {
    #[inline(always)]
    fn from(state: HealthState) -> u8 {
        state.to_index()
    }
}

impl From<HealthState> for char {
    #[inline(always)]
    fn from(state: HealthState) -> char {
        state.to_char()
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
