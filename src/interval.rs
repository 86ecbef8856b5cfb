use crate::error::TransectError;

type Result<T> = std::result::Result<T, TransectError>;

/// Upper bound on the number of terms a single sequence may produce.
pub const MAX_INTERVALS: usize = 100_000;

/// Slack, relative to one step, that still counts `end` as reachable.
const REACH_TOLERANCE: f64 = 1e-9;

/// Arithmetic progression `start, start + step, ...` truncated at the last
/// term not beyond `end`. `end` itself only appears when it is a whole
/// number of steps away from `start`; a term counted as reachable within
/// the tolerance is clamped to `end`.
pub fn sequence(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(TransectError::InvalidStep { step });
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(TransectError::DegenerateSequence { start, end });
    }
    if start > end {
        return Err(TransectError::DegenerateSequence { start, end });
    }

    let steps = ((end - start) / step + REACH_TOLERANCE).floor();
    if steps >= MAX_INTERVALS as f64 {
        return Err(TransectError::TooManyIntervals {
            count: (steps as usize).saturating_add(1),
        });
    }

    let count = steps as usize + 1;
    Ok((0..count)
        .map(|i| (start + i as f64 * step).min(end))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn test_truncates_before_end() {
        let seq = sequence(0.003, 0.1, 0.006).unwrap();
        assert_eq!(seq.len(), 17);
        assert_float_absolute_eq!(seq[0], 0.003, 1e-12);
        assert_float_absolute_eq!(seq[16], 0.099, 1e-12);
    }

    #[test]
    fn test_includes_reachable_end() {
        let seq = sequence(0.003, 0.099, 0.006).unwrap();
        assert_eq!(seq.len(), 17);
        for (i, value) in seq.iter().enumerate() {
            assert_float_absolute_eq!(*value, 0.003 + 0.006 * i as f64, 1e-12);
        }
    }

    #[test]
    fn test_end_just_below_reachable_term() {
        let end = 0.1 - 1e-13;
        let seq = sequence(0.0, end, 0.01).unwrap();
        assert_eq!(seq.len(), 11);
        assert!(seq.iter().all(|v| *v <= end));
        assert_eq!(seq[10], end);
    }

    #[test]
    fn test_start_equals_end() {
        assert_eq!(sequence(0.05, 0.05, 0.01).unwrap(), vec![0.05]);
    }

    #[test]
    fn test_step_larger_than_span() {
        assert_eq!(sequence(0.0, 0.004, 0.01).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_start_beyond_end_is_rejected() {
        assert!(matches!(
            sequence(0.2, 0.1, 0.01),
            Err(TransectError::DegenerateSequence { .. })
        ));
    }

    #[test]
    fn test_invalid_step() {
        assert!(matches!(
            sequence(0.0, 0.1, 0.0),
            Err(TransectError::InvalidStep { .. })
        ));
        assert!(matches!(
            sequence(0.0, 0.1, -0.5),
            Err(TransectError::InvalidStep { .. })
        ));
        assert!(matches!(
            sequence(0.0, 0.1, f64::NAN),
            Err(TransectError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_too_many_intervals() {
        assert!(matches!(
            sequence(0.0, 1.0, 1e-9),
            Err(TransectError::TooManyIntervals { .. })
        ));
    }
}
