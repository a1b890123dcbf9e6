mod error;

pub mod prelude {
    pub use crate::error::{ConfigurationError, DisplayableError, UserCodeError};
}
