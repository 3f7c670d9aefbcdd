// Domain models: persisted result rows and request metadata

mod record;
mod submission;

pub use record::{FIELD_NAMES, ResultRecord, TEST_METHOD};
pub use submission::SubmissionMeta;
