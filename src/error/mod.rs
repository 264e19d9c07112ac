mod push_error;

pub use push_error::{PushError, PushResult};
