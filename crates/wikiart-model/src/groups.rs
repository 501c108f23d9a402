use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of artist style groups a dataset can be curated around.
///
/// Group names are a closed enumeration validated at parse time, so a
/// misspelled slug is a hard error instead of silently fetching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtistGroup {
    Baroque,
    FrenchClassicism,
    Rococo,
    Neoclassicism,
    Mannerism,
    Romanticism,
    Orientalism,
    Realism,
    Naturalism,
    Cubism,
    PopArt,
    EdoPeriod,
    MeijiPeriod,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown artist group: {0:?}")]
pub struct UnknownGroup(pub String);

impl ArtistGroup {
    /// Every group, in catalog order.
    pub const ALL: [ArtistGroup; 13] = [
        ArtistGroup::Baroque,
        ArtistGroup::FrenchClassicism,
        ArtistGroup::Rococo,
        ArtistGroup::Neoclassicism,
        ArtistGroup::Mannerism,
        ArtistGroup::Romanticism,
        ArtistGroup::Orientalism,
        ArtistGroup::Realism,
        ArtistGroup::Naturalism,
        ArtistGroup::Cubism,
        ArtistGroup::PopArt,
        ArtistGroup::EdoPeriod,
        ArtistGroup::MeijiPeriod,
    ];

    /// The URL-safe slug used as the on-disk and catalog key.
    pub fn as_slug(&self) -> &'static str {
        match self {
            ArtistGroup::Baroque => "baroque",
            ArtistGroup::FrenchClassicism => "french-classicism",
            ArtistGroup::Rococo => "rococo",
            ArtistGroup::Neoclassicism => "neoclassicism",
            ArtistGroup::Mannerism => "mannerism",
            ArtistGroup::Romanticism => "romanticism",
            ArtistGroup::Orientalism => "orientalism",
            ArtistGroup::Realism => "realism",
            ArtistGroup::Naturalism => "naturalism",
            ArtistGroup::Cubism => "cubism",
            ArtistGroup::PopArt => "popart",
            ArtistGroup::EdoPeriod => "edo-period",
            ArtistGroup::MeijiPeriod => "meiji-period",
        }
    }
}

impl FromStr for ArtistGroup {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtistGroup::ALL
            .iter()
            .copied()
            .find(|g| g.as_slug() == s)
            .ok_or_else(|| UnknownGroup(s.to_string()))
    }
}

impl fmt::Display for ArtistGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_slug_round_trips() {
        for group in ArtistGroup::ALL {
            let parsed: ArtistGroup = group.as_slug().parse().unwrap();
            assert_eq!(parsed, group);
        }
    }

    #[test]
    fn test_misspelled_slug_is_rejected() {
        // The classic silent-data-loss typo
        let err = "french-classicim".parse::<ArtistGroup>().unwrap_err();
        assert_eq!(err, UnknownGroup("french-classicim".to_string()));
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = ArtistGroup::ALL.iter().map(|g| g.as_slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), ArtistGroup::ALL.len());
    }
}
