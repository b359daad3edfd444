//! File name codec for published posts: the publish timestamp travels inside
//! the file name as a digit-only encoding.

pub mod post_name;
pub mod timestamp;

pub use post_name::{PostName, PostNameError};
pub use timestamp::{decode, encode, PostTimestamp, TimestampError};
