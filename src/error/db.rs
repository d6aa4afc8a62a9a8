use sea_orm::{DbErr, RuntimeErr};
use sqlx::{error::ErrorKind, Error as SqlxError};

pub trait DatabaseError {
    fn unique_violation(&self, constraint: &str) -> bool;
}

impl DatabaseError for DbErr {
    fn unique_violation(&self, constraint: &str) -> bool {
        is_kind_and_constraint(self, ErrorKind::UniqueViolation, constraint)
    }
}

#[allow(clippy::borrowed_box)]
fn get_database_error(err: &DbErr) -> Option<&Box<dyn sqlx::error::DatabaseError + 'static>> {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(SqlxError::Database(db_err))) => Some(db_err),
        DbErr::Exec(RuntimeErr::SqlxError(SqlxError::Database(db_err))) => Some(db_err),
        _ => None,
    }
}

// sqlite does not report constraint names, only postgres does
fn is_kind_and_constraint(err: &DbErr, kind: ErrorKind, constraint: &str) -> bool {
    let Some(db_err) = get_database_error(err) else {
        return false;
    };

    if db_err.kind() != kind {
        return false;
    }

    match db_err.constraint() {
        Some(name) => name == constraint,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_database_errors_are_violations() {
        let err = DbErr::RecordNotFound("users".to_owned());

        assert!(!err.unique_violation("uc_users_email"));
        assert!(!DbErr::Custom("unique".to_owned()).unique_violation("uc_users_email"));
    }
}
