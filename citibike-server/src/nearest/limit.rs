//! Result-count clamping.

/// Number of stations returned when the caller does not ask for a count.
pub const DEFAULT_LIMIT: i64 = 5;

/// Smallest number of stations ever returned (when any match).
pub const MIN_LIMIT: i64 = 1;

/// Largest number of stations ever returned.
pub const MAX_LIMIT: i64 = 50;

/// Turn a requested count into the number of stations to return.
///
/// Absent or zero means [`DEFAULT_LIMIT`]; anything else is clamped to
/// `[MIN_LIMIT, MAX_LIMIT]`.
///
/// # Examples
///
/// ```
/// use citibike_server::nearest::clamp_limit;
///
/// assert_eq!(clamp_limit(None), 5);
/// assert_eq!(clamp_limit(Some(0)), 5);
/// assert_eq!(clamp_limit(Some(3)), 3);
/// assert_eq!(clamp_limit(Some(1000)), 50);
/// ```
pub fn clamp_limit(requested: Option<i64>) -> usize {
    let limit = match requested {
        None | Some(0) => DEFAULT_LIMIT,
        Some(n) => n.clamp(MIN_LIMIT, MAX_LIMIT),
    };
    limit as usize
}
