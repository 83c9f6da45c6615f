mod comedian;
mod page;
mod submission;
mod tag;
mod video;

pub use comedian::*;
pub use page::*;
pub use submission::*;
pub use tag::*;
pub use video::*;
