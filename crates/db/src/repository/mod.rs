//! Repository functions — one function per database operation.
//!
//! Every function takes a `&dyn Store` and returns a `Result<T, DbError>`.
//! No business logic, no presentation — parameterized SQL and row shaping.

pub mod companies;
