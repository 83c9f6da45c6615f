pub mod promotion;

pub use promotion::{promote_next_ready, start_promotion_job};
