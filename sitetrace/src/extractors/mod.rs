//! Per-directory extraction strategies.
//!
//! Each supported directory has one strategy implementing two capabilities:
//! - [`IdentifierExtractor`]: result URL to stable identifier
//! - [`ContentExtractor`]: fetched HTML to candidate website URLs
//!
//! [`strategy_for`] selects the strategy for a [`SourceType`](crate::core::SourceType).

mod appstore;
mod glassdoor;
pub(crate) mod html;
mod linkedin;
mod pitchbook;
mod playstore;
mod protocols;
mod registry;

pub use appstore::AppStoreStrategy;
pub use glassdoor::GlassdoorStrategy;
pub use linkedin::LinkedInStrategy;
pub use pitchbook::PitchbookStrategy;
pub use playstore::PlayStoreStrategy;
pub use protocols::{ContentExtractor, IdentifierExtractor, SourceStrategy};
pub use registry::strategy_for;
