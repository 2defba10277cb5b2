/// Wire sentinel for "no limit". Never passes through normalization; pagers
/// route it to explicit unlimited mode.
pub const NO_LIMIT: i64 = -1;

/// Substituted when a request asks for a zero or negative page size.
pub const DEFAULT_LIMIT: u64 = 10;

/// Upper bound applied to requested page sizes.
pub const MAX_LIMIT: u64 = 100;

/// Normalizes a requested limit against `max`. Returns the effective limit
/// and whether the request passed through unchanged: zero and negative
/// requests become [`DEFAULT_LIMIT`], requests above `max` are capped.
pub fn clamp(requested: i64, max: u64) -> (u64, bool) {
    if requested <= 0 {
        return (DEFAULT_LIMIT, false);
    }

    let requested = requested as u64;
    if requested > max {
        return (max, false);
    }

    (requested, true)
}

/// Normalizes a requested limit against [`MAX_LIMIT`].
pub fn clamp_default(requested: i64) -> u64 {
    clamp(requested, MAX_LIMIT).0
}
