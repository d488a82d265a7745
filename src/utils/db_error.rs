//! Classification of Postgres errors raised by inserts.

use crate::domain::StoreError;

/// Name of the unique index guarding `url_mappings.code`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "url_mappings_code_key";

/// Returns true if `e` is a unique violation on the code index.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_UNIQUE_CONSTRAINT) | None)
}

/// Maps an insert failure for `code` onto the store taxonomy.
pub fn map_insert_error(e: sqlx::Error, code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::DuplicateCode {
            code: code.to_string(),
        };
    }

    StoreError::from(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_map_insert_error_falls_back_to_unavailable() {
        let err = map_insert_error(sqlx::Error::PoolClosed, "abcd");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
