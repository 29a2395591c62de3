use crate::common::error::AppError;

/// Traduz violação de chave única do Postgres para o nosso erro, usando o nome da constraint.
/// `fields` mapeia constraint -> nome do campo exposto na API.
pub(crate) fn map_unique_violation(e: sqlx::Error, fields: &[(&str, &str)]) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            return match fields.iter().find(|(name, _)| *name == constraint) {
                Some((_, field)) => AppError::DuplicateKey(field.to_string()),
                None => AppError::DuplicateKey(constraint.to_string()),
            };
        }
    }
    e.into()
}
