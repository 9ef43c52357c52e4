use sqlx::SqlitePool;

use factorygen_core::Result;

pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        select name
        from sqlite_master
        where type = 'table'
          and name not like 'sqlite_%'
        order by rowid
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|err| factorygen_core::Error::Db(err.to_string()))
}

pub struct RawColumn {
    pub name: String,
    pub declared_type: String,
}

pub async fn list_columns(pool: &SqlitePool, table: &str) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        select name, type
        from pragma_table_info(?1)
        order by cid
        "#,
    )
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| factorygen_core::Error::Db(err.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(name, declared_type)| RawColumn {
            name,
            declared_type,
        })
        .collect())
}
