use crate::object_model::LanguageBytes;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Integer share of each language, keyed exactly like the byte counts it came from.
///
/// Shares are rounded individually (half up) and never renormalised, so the
/// total may drift a few points away from 100.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageBreakdown(Vec<(String, u32)>);

impl LanguageBreakdown {
    pub fn from_bytes(bytes: &LanguageBytes) -> Self {
        let total = bytes.0.iter().map(|(_, n)| u128::from(*n)).sum::<u128>();
        Self(
            bytes
                .0
                .iter()
                .map(|(name, n)| (name.clone(), percentage(u128::from(*n), total)))
                .collect(),
        )
    }

    pub fn get(&self, language: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, pct)| *pct)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, pct)| (name.as_str(), *pct))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn percentage(bytes: u128, total: u128) -> u32 {
    if total == 0 {
        return 0;
    }
    // round(100 * bytes / total), half up, in integers
    let pct = (200 * bytes + total) / (2 * total);
    u32::try_from(pct).unwrap_or(100)
}

impl Serialize for LanguageBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, pct) in &self.0 {
            map.serialize_entry(name, pct)?;
        }
        map.end()
    }
}
