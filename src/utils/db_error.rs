/// Name of the primary key constraint on `urls.code`.
const URLS_CODE_CONSTRAINT: &str = "urls_pkey";

/// Returns true if `e` is a unique violation on the short code column.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(URLS_CODE_CONSTRAINT) | None)
}
