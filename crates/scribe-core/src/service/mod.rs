//! Use-case services composed from the domain and the ports.

mod drafts;
mod engagement;
mod publish;

pub use drafts::{DraftService, MAX_PAGE_SIZE};
pub use engagement::EngagementService;
pub use publish::PublishCoordinator;
