mod error;
pub mod pipeline;
pub mod recover;
pub mod signature;
pub mod tweet;
pub mod validate;

pub use error::Error;
pub use pipeline::{verify, VerificationResult};
pub use recover::recover;
pub use signature::{extract, Signature};
pub use tweet::{TweetId, TweetRecord};
pub use validate::is_valid_address;

pub type Result<T> = std::result::Result<T, error::Error>;
