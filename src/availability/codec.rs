use serde::{Deserialize, Serialize};

/// Availability of one participant for one slot.
///
/// Each variant has a single-character code used by the storage format:
/// `'0'` unavailable, `'1'` available, `'2'` if needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    Unavailable,
    Available,
    IfNeeded,
}

impl Availability {
    pub const ALL: [Availability; 3] = [
        Availability::Unavailable,
        Availability::Available,
        Availability::IfNeeded,
    ];

    pub fn code(self) -> char {
        match self {
            Availability::Unavailable => '0',
            Availability::Available => '1',
            Availability::IfNeeded => '2',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == c)
    }
}

/// Result of a lenient decode, with the number of characters that were not
/// one of the canonical codes (each of those decoded to `Unavailable`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub values: Vec<Availability>,
    pub unknown: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.unknown == 0
    }
}

pub fn encode(values: &[Availability]) -> String {
    values.iter().map(|a| a.code()).collect()
}

pub fn decode(encoded: &str) -> Vec<Availability> {
    encoded
        .chars()
        .map(|c| Availability::from_code(c).unwrap_or(Availability::Unavailable))
        .collect()
}

pub fn decode_with_report(encoded: &str) -> DecodeReport {
    let mut unknown = 0;
    let values = encoded
        .chars()
        .map(|c| {
            Availability::from_code(c).unwrap_or_else(|| {
                unknown += 1;
                Availability::Unavailable
            })
        })
        .collect();

    DecodeReport { values, unknown }
}
