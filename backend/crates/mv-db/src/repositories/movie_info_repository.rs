use crate::Result as DbErrorResult;

use mv_core::MovieInfo;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_COLUMNS: &str = "SELECT id, name, year, cast_members, release_date FROM movie_info";

/// Record store for movie catalog entries
pub struct MovieInfoRepository {
    pool: SqlitePool,
}

impl MovieInfoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a record, assigning an identifier when it has none.
    pub async fn create(&self, movie_info: MovieInfo) -> DbErrorResult<MovieInfo> {
        let movie_info = movie_info.with_generated_id();
        let cast = serde_json::to_string(&movie_info.cast)?;

        sqlx::query(
            r#"
              INSERT INTO movie_info (id, name, year, cast_members, release_date)
              VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(movie_info.id()?)
        .bind(&movie_info.name)
        .bind(movie_info.year)
        .bind(&cast)
        .bind(movie_info.release_date)
        .execute(&self.pool)
        .await?;

        Ok(movie_info)
    }

    pub async fn find_by_id(&self, id: &str) -> DbErrorResult<Option<MovieInfo>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// All records in insertion order
    pub async fn find_all(&self) -> DbErrorResult<Vec<MovieInfo>> {
        let rows = sqlx::query(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_year(&self, year: i32) -> DbErrorResult<Vec<MovieInfo>> {
        let rows = sqlx::query(&format!(
            "{} WHERE year = ? ORDER BY rowid ASC",
            SELECT_COLUMNS
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Overwrite name, year, cast and release date; `None` when `id` is unknown.
    pub async fn update(&self, id: &str, changes: MovieInfo) -> DbErrorResult<Option<MovieInfo>> {
        let Some(mut existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        existing.apply_update(changes);
        let cast = serde_json::to_string(&existing.cast)?;

        sqlx::query(
            r#"
              UPDATE movie_info
              SET name = ?, year = ?, cast_members = ?, release_date = ?
              WHERE id = ?
              "#,
        )
        .bind(&existing.name)
        .bind(existing.year)
        .bind(&cast)
        .bind(existing.release_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(existing))
    }

    /// Returns whether a record was removed
    pub async fn delete_by_id(&self, id: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM movie_info WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row(row: &SqliteRow) -> DbErrorResult<MovieInfo> {
    let cast: String = row.try_get("cast_members")?;
    let release_date: NaiveDate = row.try_get("release_date")?;

    Ok(MovieInfo {
        movie_info_id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        year: row.try_get("year")?,
        cast: serde_json::from_str(&cast)?,
        release_date,
    })
}
