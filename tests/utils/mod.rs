pub mod builders;
pub mod setup;

pub use builders::{failed_share_text, share_text, EventBuilder};
pub use setup::TestSetup;
