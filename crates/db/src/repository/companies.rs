//! Company CRUD operations, plus the read-only join to `jobs`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    sql::sql_for_partial_update,
    Company, CompanyFilter, CompanyUpdate, CompanyWithJobs, DbError, JobSummary, Row, SqlValue,
    Store,
};

const COMPANY_COLUMNS: &str =
    r#"handle, name, description, num_employees AS "numEmployees", logo_url AS "logoUrl""#;

/// Primary key of `companies`; a violation means the handle is taken.
const COMPANY_PKEY: &str = "companies_pkey";

/// camelCase field → storage column, for fields whose names differ.
const COMPANY_FIELD_COLUMNS: &[(&str, &str)] =
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

/// `%needle%` for `ILIKE ... ESCAPE '\'`, with wildcards in `needle` taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn decode<T: DeserializeOwned>(row: Row) -> Result<T, DbError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Insert a new company.
///
/// Returns `DbError::DuplicateEntity` if the handle is already taken, whether
/// caught by the lookup or by the primary key on insert.  Any other unique
/// violation comes back as `DbError::UniqueViolation`.
pub async fn create(store: &dyn Store, data: &Company) -> Result<Company, DbError> {
    let existing = store
        .execute(
            "SELECT handle FROM companies WHERE handle = $1",
            vec![SqlValue::from(data.handle.as_str())],
        )
        .await?;
    if !existing.is_empty() {
        return Err(DbError::DuplicateEntity(data.handle.clone()));
    }

    let sql = format!(
        r#"
        INSERT INTO companies (handle, name, description, num_employees, logo_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COMPANY_COLUMNS}
        "#
    );
    let rows = store
        .execute(
            &sql,
            vec![
                SqlValue::from(data.handle.as_str()),
                SqlValue::from(data.name.as_str()),
                SqlValue::from(data.description.as_str()),
                SqlValue::Int(data.num_employees),
                SqlValue::Text(data.logo_url.clone()),
            ],
        )
        .await
        .map_err(|e| {
            if e.violates(COMPANY_PKEY) {
                DbError::DuplicateEntity(data.handle.clone())
            } else {
                e
            }
        })?;

    let row = rows
        .into_iter()
        .next()
        .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))?;
    decode(row)
}

/// Return every company matching `filter`, without jobs.
///
/// With at least one filter set the result is ordered by name; otherwise it
/// comes back in whatever order the database yields.
pub async fn find_all(store: &dyn Store, filter: &CompanyFilter) -> Result<Vec<Company>, DbError> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(DbError::InvalidRange { min, max });
        }
    }

    let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    if let Some(min) = filter.min_employees {
        params.push(SqlValue::from(min));
        clauses.push(format!("num_employees >= ${}", params.len()));
    }
    if let Some(max) = filter.max_employees {
        params.push(SqlValue::from(max));
        clauses.push(format!("num_employees <= ${}", params.len()));
    }
    if let Some(name) = &filter.name {
        params.push(SqlValue::from(contains_pattern(name)));
        clauses.push(format!(r"name ILIKE ${} ESCAPE '\'", params.len()));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
        sql.push_str(" ORDER BY name");
    }

    store
        .execute(&sql, params)
        .await?
        .into_iter()
        .map(decode::<Company>)
        .collect()
}

/// Fetch a single company by handle, with all of its jobs.
pub async fn get(store: &dyn Store, handle: &str) -> Result<CompanyWithJobs, DbError> {
    let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
    let company: Company = match store
        .execute(&sql, vec![SqlValue::from(handle)])
        .await?
        .into_iter()
        .next()
    {
        Some(row) => decode(row)?,
        None => return Err(DbError::NotFound(handle.to_owned())),
    };

    let jobs = store
        .execute(
            r#"
            SELECT id, title, salary, equity
            FROM jobs
            WHERE company_handle = $1
            ORDER BY id
            "#,
            vec![SqlValue::from(handle)],
        )
        .await?
        .into_iter()
        .map(decode::<JobSummary>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompanyWithJobs { company, jobs })
}

/// Apply a partial update to a company; untouched fields keep their values.
///
/// Returns `DbError::BadRequest` if `data` sets nothing and
/// `DbError::NotFound` if no company has this handle.
pub async fn update(
    store: &dyn Store,
    handle: &str,
    data: &CompanyUpdate,
) -> Result<Company, DbError> {
    let update = sql_for_partial_update(&data.fields(), COMPANY_FIELD_COLUMNS)?;
    let handle_idx = update.next_placeholder();

    let sql = format!(
        r#"
        UPDATE companies
        SET {}
        WHERE handle = ${handle_idx}
        RETURNING {COMPANY_COLUMNS}
        "#,
        update.set_clause,
    );

    let mut params = update.values;
    params.push(SqlValue::from(handle));

    let row = store
        .execute(&sql, params)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound(handle.to_owned()))?;
    decode(row)
}

/// Permanently delete a company by handle.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove(store: &dyn Store, handle: &str) -> Result<(), DbError> {
    let rows = store
        .execute(
            "DELETE FROM companies WHERE handle = $1 RETURNING handle",
            vec![SqlValue::from(handle)],
        )
        .await?;

    if rows.is_empty() {
        return Err(DbError::NotFound(handle.to_owned()));
    }

    Ok(())
}
