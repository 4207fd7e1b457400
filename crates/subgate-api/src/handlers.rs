//! Request handlers.

pub mod download;
pub mod health;
pub mod proxy;
pub mod subtitles;

pub use download::*;
pub use health::*;
pub use proxy::*;
pub use subtitles::*;
