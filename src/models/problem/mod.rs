//! Problem definition models.

mod costs;
pub use self::costs::CostMatrix;

mod fleet;
pub use self::fleet::Vehicle;

mod jobs;
pub use self::jobs::Job;
