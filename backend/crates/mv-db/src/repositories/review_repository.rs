use crate::Result as DbErrorResult;

use mv_core::Review;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_COLUMNS: &str = "SELECT id, movie_info_id, comment, rating FROM reviews";

/// Record store for reviews
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, review: Review) -> DbErrorResult<Review> {
        let review = review.with_generated_id();

        sqlx::query(
            r#"
              INSERT INTO reviews (id, movie_info_id, comment, rating)
              VALUES (?, ?, ?, ?)
              "#,
        )
        .bind(review.id()?)
        .bind(review.movie_info_id)
        .bind(&review.comment)
        .bind(review.rating)
        .execute(&self.pool)
        .await?;

        Ok(review)
    }

    pub async fn find_by_id(&self, id: &str) -> DbErrorResult<Option<Review>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Review>> {
        let rows = sqlx::query(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row).collect()
    }

    pub async fn find_by_movie_info_id(&self, movie_info_id: i64) -> DbErrorResult<Vec<Review>> {
        let rows = sqlx::query(&format!(
            "{} WHERE movie_info_id = ? ORDER BY rowid ASC",
            SELECT_COLUMNS
        ))
        .bind(movie_info_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Overwrite comment and rating; `None` when `id` is unknown.
    pub async fn update(&self, id: &str, changes: Review) -> DbErrorResult<Option<Review>> {
        let Some(mut existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        existing.apply_update(changes);

        sqlx::query("UPDATE reviews SET comment = ?, rating = ? WHERE id = ?")
            .bind(&existing.comment)
            .bind(existing.rating)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Some(existing))
    }

    pub async fn delete_by_id(&self, id: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row(row: &SqliteRow) -> DbErrorResult<Review> {
    Ok(Review {
        review_id: Some(row.try_get("id")?),
        movie_info_id: row.try_get("movie_info_id")?,
        comment: row.try_get("comment")?,
        rating: row.try_get("rating")?,
    })
}
