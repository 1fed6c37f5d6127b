//! Shared handler helpers.

use crate::error::AppError;

/// Parse a path id; ids are positive 64-bit integers assigned by the store.
pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    match id_str.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!("invalid id '{}'", id_str))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
        assert!(matches!(parse_id("0"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("-7"), Err(AppError::BadRequest(_))));
    }
}
