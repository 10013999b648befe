pub mod key;
pub mod cipher;
pub mod engine;
pub mod progress;

pub use key::{validate, Key, KeyError};
pub use engine::{transform, TransformError, TransformRequest};
pub use progress::{ProgressFn, TerminalBar};
