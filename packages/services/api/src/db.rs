use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = if let Some(path) = database_url.strip_prefix("sqlite://") {
        if path == ":memory:" {
            SqliteConnectOptions::from_str(database_url)?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        }
    } else {
        SqliteConnectOptions::from_str(database_url)?.create_if_missing(true)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options.foreign_keys(true))
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    let queries = [
        r#"CREATE TABLE IF NOT EXISTS yt_comm_group (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            comm_group_name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_commodity (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            commodity_name TEXT NOT NULL UNIQUE,
            active INTEGER NOT NULL DEFAULT 1,
            comm_group_id INTEGER REFERENCES yt_comm_group(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_group (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_name TEXT NOT NULL UNIQUE,
            company_name TEXT,
            group_description TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_license (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            license_type TEXT NOT NULL,
            license_issue_date TEXT,
            license_expiry_date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_role (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            role_name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT,
            contact TEXT,
            email TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            company_name TEXT,
            address TEXT,
            city TEXT,
            country TEXT,
            postal_code TEXT,
            disabled INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_user_system_description (
            user_id INTEGER PRIMARY KEY REFERENCES yt_user(id),
            group_id INTEGER REFERENCES yt_group(id),
            role_id INTEGER REFERENCES yt_role(id),
            license_id INTEGER REFERENCES yt_license(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_model (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            model_name TEXT NOT NULL UNIQUE
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_assign_model (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            model_id INTEGER NOT NULL REFERENCES yt_model(id)
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_model_forecast (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            assign_model_id INTEGER NOT NULL REFERENCES yt_assign_model(id),
            forecast_value REAL NOT NULL,
            actual_value REAL NOT NULL
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_model_metric_type (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type_name TEXT NOT NULL UNIQUE
        );"#,
        r#"CREATE TABLE IF NOT EXISTS yt_model_metric (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            metric_score REAL NOT NULL,
            metric_type_id INTEGER NOT NULL REFERENCES yt_model_metric_type(id),
            assign_model_id INTEGER NOT NULL REFERENCES yt_assign_model(id)
        );"#,
    ];

    for query in queries {
        sqlx::query(query).execute(pool).await?;
    }

    // 지표 타입 시드
    for type_name in ["MAPE", "MSE", "RMSE", "MAE", "WAPE"] {
        sqlx::query("INSERT OR IGNORE INTO yt_model_metric_type (type_name) VALUES (?)")
            .bind(type_name)
            .execute(pool)
            .await?;
    }

    Ok(())
}
