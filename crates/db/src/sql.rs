//! SQL fragment helpers shared by the repositories.

use crate::{DbError, SqlValue};

/// The `SET` clause of a partial update and the values it binds, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// e.g. `"name"=$1, "num_employees"=$2`
    pub set_clause: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder index of the first parameter after the `SET` values.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the `SET` clause for updating only the supplied fields.
///
/// `field_to_column` maps field names to storage columns; a field missing
/// from it is used as the column name unchanged.  Placeholders start at `$1`
/// and follow the order of `data`.
pub fn sql_for_partial_update(
    data: &[(&str, SqlValue)],
    field_to_column: &[(&str, &str)],
) -> Result<PartialUpdate, DbError> {
    if data.is_empty() {
        return Err(DbError::BadRequest("no data".into()));
    }

    let set_clause = data
        .iter()
        .enumerate()
        .map(|(idx, (field, _))| {
            let field: &str = field;
            let column = field_to_column
                .iter()
                .find(|(from, _)| *from == field)
                .map_or(field, |(_, to)| *to);
            format!("\"{column}\"=${}", idx + 1)
        })
        .collect::<Vec<_>>()
        .join(", ");

    let values = data.iter().map(|(_, value)| value.clone()).collect();

    Ok(PartialUpdate { set_clause, values })
}
