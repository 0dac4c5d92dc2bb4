use crate::errors::{Error, Result};

/// Fails with `Forbidden` unless `owner_id` is the acting user.
pub fn ensure_owner(owner_id: &str, user_id: &str, resource: &str) -> Result<()> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(Error::Forbidden(resource.to_string()))
    }
}

/// Clamps a caller-supplied list limit into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(crate::constants::DEFAULT_LIST_LIMIT)
        .clamp(1, crate::constants::MAX_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_and_stranger_is_forbidden() {
        assert!(ensure_owner("u1", "u1", "goal").is_ok());
        let err = ensure_owner("u1", "u2", "goal").unwrap_err();
        assert_eq!(err.to_string(), "You do not have access to this goal");
    }

    #[test]
    fn limits_are_clamped() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(5000)), 1000);
    }
}
