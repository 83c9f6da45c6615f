mod stats_service;
mod submission_service;
mod tag_query;
mod video_query;
mod video_service;

pub use stats_service::*;
pub use submission_service::*;
pub use tag_query::*;
pub use video_query::*;
pub use video_service::*;
