//! Source type to strategy dispatch.

use super::{
    AppStoreStrategy, GlassdoorStrategy, LinkedInStrategy, PitchbookStrategy, PlayStoreStrategy,
    SourceStrategy,
};
use crate::core::SourceType;

static LINKEDIN: LinkedInStrategy = LinkedInStrategy;
static GLASSDOOR: GlassdoorStrategy = GlassdoorStrategy;
static PITCHBOOK: PitchbookStrategy = PitchbookStrategy;
static PLAY_STORE: PlayStoreStrategy = PlayStoreStrategy;
static APP_STORE: AppStoreStrategy = AppStoreStrategy;

/// Returns the strategy registered for `source`.
///
/// The match is exhaustive, so adding a [`SourceType`] variant without a
/// strategy does not compile.
#[must_use]
pub fn strategy_for(source: SourceType) -> &'static dyn SourceStrategy {
    match source {
        SourceType::ProfessionalNetwork => &LINKEDIN,
        SourceType::ReviewSite => &GLASSDOOR,
        SourceType::InvestmentDb => &PITCHBOOK,
        SourceType::AppStoreAndroid => &PLAY_STORE,
        SourceType::AppStoreIos => &APP_STORE,
    }
}
