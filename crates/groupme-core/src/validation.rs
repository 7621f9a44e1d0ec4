use crate::{SyncError, SyncResult, NICKNAME_MAX_CHARS, NICKNAME_MIN_CHARS};

/// Nicknames are counted in characters, not bytes; both bounds are inclusive.
pub fn validate_nickname(nickname: &str) -> SyncResult<()> {
    let len = nickname.chars().count();
    if !(NICKNAME_MIN_CHARS..=NICKNAME_MAX_CHARS).contains(&len) {
        return Err(SyncError::validation(format!(
            "nickname must be {NICKNAME_MIN_CHARS}-{NICKNAME_MAX_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_bounds_are_inclusive() {
        assert!(validate_nickname("").is_err());
        assert!(validate_nickname("a").is_ok());
        assert!(validate_nickname(&"a".repeat(50)).is_ok());
        assert!(validate_nickname(&"a".repeat(51)).is_err());
    }

    #[test]
    fn nickname_length_counts_characters() {
        let nickname = "é".repeat(50);
        assert_eq!(nickname.len(), 100);
        assert!(validate_nickname(&nickname).is_ok());
    }

    #[test]
    fn rejection_is_a_validation_error() {
        let err = validate_nickname("").expect_err("empty nickname");
        assert_eq!(err.kind(), "validation");
    }
}
