//! Directory source types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ResolveError;

/// The third-party directory a record is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// Professional network company pages (LinkedIn).
    #[serde(rename = "linkedin")]
    ProfessionalNetwork,
    /// Employer review pages (Glassdoor).
    #[serde(rename = "glassdoor")]
    ReviewSite,
    /// Investment database profiles (PitchBook).
    #[serde(rename = "pitchbook")]
    InvestmentDb,
    /// Android app listings (Google Play).
    #[serde(rename = "playstore")]
    AppStoreAndroid,
    /// iOS app listings (Apple App Store).
    #[serde(rename = "appstore")]
    AppStoreIos,
}

impl SourceType {
    /// Every source type, in output-file order.
    pub const ALL: [Self; 5] = [
        Self::ProfessionalNetwork,
        Self::ReviewSite,
        Self::InvestmentDb,
        Self::AppStoreAndroid,
        Self::AppStoreIos,
    ];

    /// Returns the wire name used in input and output files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProfessionalNetwork => "linkedin",
            Self::ReviewSite => "glassdoor",
            Self::InvestmentDb => "pitchbook",
            Self::AppStoreAndroid => "playstore",
            Self::AppStoreIos => "appstore",
        }
    }

    /// Returns the descriptive kebab-case name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::ProfessionalNetwork => "professional-network",
            Self::ReviewSite => "review-site",
            Self::InvestmentDb => "investment-db",
            Self::AppStoreAndroid => "app-store-android",
            Self::AppStoreIos => "app-store-ios",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == needle || source.kind_name() == needle)
            .ok_or_else(|| ResolveError::UnknownSourceType(s.trim().to_string()))
    }
}
