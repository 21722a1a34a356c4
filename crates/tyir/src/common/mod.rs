//! Common infrastructure shared across the IR and builder

mod error;

pub use error::{BuildError, BuildResult};
