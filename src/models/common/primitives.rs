/// Represents a time duration.
pub type Duration = i64;

/// Represents a timestamp.
pub type Timestamp = i64;

/// Specifies travel cost. Kept 64-bit signed so that accumulated route costs cannot
/// overflow on realistic instances.
pub type Cost = i64;

/// Specifies a cost decrease produced by a route modification. Positive means improving.
pub type Gain = i64;
