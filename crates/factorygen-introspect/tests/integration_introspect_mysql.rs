use std::env;

use anyhow::{Context, Result};
use factorygen_introspect::{EngineKind, MySqlIntrospector, SchemaIntrospector};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

const FIXTURE: &[&str] = &[
    "drop view if exists fg_user_names",
    "drop table if exists fg_posts",
    "drop table if exists fg_users",
    "create table fg_users (id int(10) unsigned not null primary key, name varchar(255), created_at datetime)",
    "create table fg_posts (id bigint(20) unsigned not null primary key, title varchar(120), body text, published tinyint(1), user_id int(11))",
    "create view fg_user_names as select name from fg_users",
];

/// MySQL URL from `TEST_MYSQL_URL`, or `TEST_DATABASE_URL` / `DATABASE_URL`
/// when those point at MySQL. `None` skips the test.
fn mysql_url() -> Option<String> {
    env::var("TEST_MYSQL_URL")
        .ok()
        .or_else(|| {
            ["TEST_DATABASE_URL", "DATABASE_URL"]
                .into_iter()
                .filter_map(|key| env::var(key).ok())
                .find(|url| EngineKind::from_url(url).ok() == Some(EngineKind::MySql))
        })
}

async fn reset_fixtures(pool: &MySqlPool) -> Result<()> {
    for statement in FIXTURE {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("executing fixture `{statement}`"))?;
    }
    Ok(())
}

async fn fixture_introspector() -> Result<Option<MySqlIntrospector>> {
    let Some(url) = mysql_url() else {
        eprintln!("skipping: set TEST_MYSQL_URL to run MySQL introspection tests");
        return Ok(None);
    };

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(&url)
        .await
        .context("connecting to MySQL")?;
    reset_fixtures(&pool).await?;

    Ok(Some(MySqlIntrospector::new(pool)))
}

#[tokio::test]
async fn introspects_base_tables_and_column_types() -> Result<()> {
    let Some(introspector) = fixture_introspector().await? else {
        return Ok(());
    };

    let tables = introspector.fetch_tables().await?;
    assert!(tables.iter().any(|table| table == "fg_users"));
    assert!(tables.iter().any(|table| table == "fg_posts"));
    assert!(
        !tables.iter().any(|table| table == "fg_user_names"),
        "views are not listed"
    );

    let columns = introspector.fetch_columns("fg_posts").await?;
    let fields: Vec<&str> = columns.iter().map(|column| column.field.as_str()).collect();
    assert_eq!(fields, vec!["id", "title", "body", "published", "user_id"]);

    // MySQL 8 drops integer display widths except for tinyint(1).
    let id = &columns[0].column_type;
    assert!(id.starts_with("bigint") && id.ends_with("unsigned"), "{id}");
    assert_eq!(columns[1].column_type, "varchar(120)");
    assert_eq!(columns[2].column_type, "text");
    assert_eq!(columns[3].column_type, "tinyint(1)");
    assert!(columns[4].column_type.starts_with("int"));

    let users = introspector.fetch_columns("fg_users").await?;
    let user_id = &users[0].column_type;
    assert!(user_id.starts_with("int") && user_id.ends_with("unsigned"), "{user_id}");
    assert_eq!(users[2].column_type, "datetime");
    Ok(())
}
