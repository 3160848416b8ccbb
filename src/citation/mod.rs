//! Citation extraction from free-form brief text.
//!
//! Two strategies are available and one is picked at startup:
//!
//! - [`StructuredExtractor`] tokenizes the text and recognizes reporter grammars
//!   (U.S., S. Ct., F., F. Supp., F. App'x, F.R.D., B.R., L. Ed., Westlaw) plus
//!   "Party v. Party" case names, emitting a corrected citation form.
//! - [`PatternExtractor`] applies a fixed, ordered list of regular expressions and
//!   emits the raw matched text.
//!
//! [`CitationExtractor`] wraps the selected strategy, falls back to the pattern
//! strategy if the structured one fails, and deduplicates while preserving the
//! order in which citations first appear.

pub mod error;
pub mod extractor;
pub mod pattern;
pub mod structured;
pub mod types;


pub use error::ExtractionError;
pub use extractor::{CitationExtractor, ExtractionStrategy};
pub use pattern::PatternExtractor;
pub use structured::{DEFAULT_TOKEN_LIMIT, StructuredExtractor};
pub use types::{Citation, CitationKind, CitationMatch, dedupe_preserving_order};
