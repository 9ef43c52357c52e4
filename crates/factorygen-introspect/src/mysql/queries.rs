use sqlx::MySqlPool;

use factorygen_core::Result;

pub async fn list_tables(pool: &MySqlPool) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        select cast(TABLE_NAME as char) as table_name
        from information_schema.tables
        where TABLE_SCHEMA = database()
          and TABLE_TYPE = 'BASE TABLE'
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|err| factorygen_core::Error::Db(err.to_string()))
}

pub struct RawColumn {
    pub name: String,
    pub column_type: String,
}

pub async fn list_columns(pool: &MySqlPool, table: &str) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        select
          cast(COLUMN_NAME as char) as column_name,
          cast(COLUMN_TYPE as char) as column_type
        from information_schema.columns
        where TABLE_SCHEMA = database()
          and TABLE_NAME = ?
        order by ORDINAL_POSITION
        "#,
    )
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| factorygen_core::Error::Db(err.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|(name, column_type)| RawColumn { name, column_type })
        .collect())
}
