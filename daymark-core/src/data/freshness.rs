//! Freshness policy: the single source of truth for staleness.
//!
//! Every refresh decision routes through [`needs_refresh`] so the
//! once-per-year contract stays testable in isolation from I/O.

/// Whether the cached artifact must be refreshed for `current_year`.
///
/// `artifact_year` is `None` when no artifact exists or no year signal is
/// recoverable from it; either way the answer is a refresh. An artifact from
/// any other year is stale regardless of its content.
pub fn needs_refresh(artifact_year: Option<i32>, current_year: i32) -> bool {
    artifact_year != Some(current_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_needs_refresh() {
        assert!(needs_refresh(None, 2024));
    }

    #[test]
    fn same_year_is_fresh() {
        assert!(!needs_refresh(Some(2024), 2024));
    }

    #[test]
    fn previous_year_is_stale() {
        assert!(needs_refresh(Some(2023), 2024));
    }

    #[test]
    fn future_year_is_stale_too() {
        // A clock rollback or a copied artifact from next year is still a
        // mismatch and must be replaced.
        assert!(needs_refresh(Some(2025), 2024));
    }
}
