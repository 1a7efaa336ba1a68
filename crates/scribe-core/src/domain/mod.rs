//! Domain entities - the core business objects.

pub mod document;
mod draft;
mod interest;
pub mod metadata;
mod post;
pub mod read_time;

pub use document::{Block, BlockKind, Document, DocumentError, Inline};
pub use draft::{Draft, DraftChange, DraftSummary, EMPTY_BODY};
pub use interest::{CategoryInterests, InterestFollowState, InterestRequirement, ReadTimePolicy};
pub use metadata::{ExtractedMetadata, TAGLINE_MAX_CHARS};
pub use post::{Comment, Post};
pub use read_time::estimate_read_time;
