//! Company repository tests against a live Postgres.
//!
//! Run with `DATABASE_URL` pointing at a server `sqlx::test` may create
//! scratch databases on, and `--features integration`.

#![cfg(feature = "integration")]

use db::repository::companies;
use db::{Company, CompanyFilter, CompanyUpdate, DbError, PgStore};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn new_company(handle: &str, name: &str) -> Company {
    Company {
        handle: handle.into(),
        name: name.into(),
        description: "old".into(),
        num_employees: Some(3),
        logo_url: None,
    }
}

fn bounds(min: Option<i32>, max: Option<i32>) -> CompanyFilter {
    CompanyFilter {
        min_employees: min,
        max_employees: max,
        ..Default::default()
    }
}

#[sqlx::test(migrations = false, fixtures("schema"))]
async fn duplicate_create_leaves_one_row(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let data = new_company("dup", "Dup Inc");

    companies::create(&store, &data).await.unwrap();
    let err = companies::create(&store, &data).await.unwrap_err();

    assert!(matches!(err, DbError::DuplicateEntity(h) if h == "dup"));
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE handle = 'dup'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = false, fixtures("schema"))]
async fn created_company_round_trips_through_get(pool: PgPool) {
    let store = PgStore::new(pool);
    let data = new_company("new", "New Co");

    let created = companies::create(&store, &data).await.unwrap();
    let found = companies::get(&store, &created.handle).await.unwrap();

    assert_eq!(created, data);
    assert_eq!(found.company, data);
    assert!(found.jobs.is_empty());
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn employee_bounds_select_the_middle_company(pool: PgPool) {
    let store = PgStore::new(pool);

    let found = companies::find_all(&store, &bounds(Some(8), Some(12))).await.unwrap();

    let handles: Vec<_> = found.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["c10"]);
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn zero_max_employees_is_honoured(pool: PgPool) {
    let store = PgStore::new(pool);

    let found = companies::find_all(&store, &bounds(None, Some(0))).await.unwrap();

    let handles: Vec<_> = found.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["c0"]);
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn inverted_bounds_are_rejected(pool: PgPool) {
    let store = PgStore::new(pool);

    let err = companies::find_all(&store, &bounds(Some(20), Some(5))).await.unwrap_err();

    assert!(matches!(err, DbError::InvalidRange { min: 20, max: 5 }));
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn name_filter_is_case_insensitive_substring(pool: PgPool) {
    let store = PgStore::new(pool);
    let filter = CompanyFilter {
        name: Some("acme".into()),
        ..Default::default()
    };

    let found = companies::find_all(&store, &filter).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Acme Corp");
    assert_eq!(found[0].logo_url.as_deref(), Some("http://c5.img"));
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn get_loads_nested_jobs(pool: PgPool) {
    let store = PgStore::new(pool);

    let found = companies::get(&store, "c5").await.unwrap();

    assert_eq!(found.company.num_employees, Some(5));
    assert_eq!(found.jobs.len(), 2);
    assert_eq!(found.jobs[0].title, "Welder");
    assert_eq!(found.jobs[0].equity, Some(Decimal::new(5, 2)));
    assert_eq!(found.jobs[1].salary, None);
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn partial_update_keeps_untouched_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let data = CompanyUpdate {
        name: Some("New Name".into()),
        ..Default::default()
    };

    let updated = companies::update(&store, "c10", &data).await.unwrap();

    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.description, "Research");
    assert_eq!(updated.num_employees, Some(10));
}

#[sqlx::test(migrations = false, fixtures("schema"))]
async fn missing_handle_is_not_found_for_writes(pool: PgPool) {
    let store = PgStore::new(pool);
    let data = CompanyUpdate {
        name: Some("x".into()),
        ..Default::default()
    };

    let update_err = companies::update(&store, "nonexistent", &data).await.unwrap_err();
    let remove_err = companies::remove(&store, "nonexistent").await.unwrap_err();

    assert!(matches!(update_err, DbError::NotFound(_)));
    assert!(matches!(remove_err, DbError::NotFound(_)));
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn removed_company_is_gone(pool: PgPool) {
    let store = PgStore::new(pool);

    companies::remove(&store, "c15").await.unwrap();
    let err = companies::get(&store, "c15").await.unwrap_err();

    assert!(matches!(err, DbError::NotFound(h) if h == "c15"));
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn taken_name_with_free_handle_is_not_a_duplicate_handle(pool: PgPool) {
    let store = PgStore::new(pool);

    let err = companies::create(&store, &new_company("fresh", "Acme Corp"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DbError::UniqueViolation { ref constraint, .. } if constraint == "companies_name_key"),
        "unexpected error: {err}"
    );
}

#[sqlx::test(migrations = false, fixtures("schema", "companies"))]
async fn name_filter_treats_wildcards_literally(pool: PgPool) {
    let store = PgStore::new(pool);
    let filter = CompanyFilter {
        name: Some("a_W".into()),
        ..Default::default()
    };

    let found = companies::find_all(&store, &filter).await.unwrap();

    assert!(found.is_empty(), "'_' matched as a wildcard: {found:?}");
}
