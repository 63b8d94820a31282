use sqlx::{PgPool, Postgres, Transaction};

use crate::modules::comments::model::{Comment, CreateCommentDto, UpdateCommentDto};
use crate::utils::errors::AppError;

const COMMENT_COLUMNS: &str =
    "id, lesson_id, user_id, year, term, comment, test_or_report, star, created_at, updated_at";

pub struct CommentService;

impl CommentService {
    /// Inserts a comment and refreshes the lesson's rating aggregates in
    /// the same transaction, so listings never see a half-updated lesson.
    pub async fn create_comment(
        db: &PgPool,
        user_id: i32,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        let lesson_exists =
            sqlx::query_scalar::<_, i32>("SELECT id FROM lessons WHERE id = $1")
                .bind(dto.lesson_id)
                .fetch_optional(db)
                .await?;
        if lesson_exists.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Lesson with id {} not found",
                dto.lesson_id
            )));
        }

        let mut tx = db.begin().await?;

        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (lesson_id, user_id, year, term, comment, test_or_report, star)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(dto.lesson_id)
        .bind(user_id)
        .bind(dto.year)
        .bind(&dto.term)
        .bind(&dto.comment)
        .bind(&dto.test_or_report)
        .bind(dto.star)
        .fetch_one(&mut *tx)
        .await?;

        Self::refresh_lesson_stats(&mut tx, dto.lesson_id).await?;
        tx.commit().await?;

        Ok(comment)
    }

    pub async fn get_comment(db: &PgPool, id: i32) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Comment with id {} not found", id)))?;

        Ok(comment)
    }

    pub async fn get_comments_by_lesson(
        db: &PgPool,
        lesson_id: i32,
    ) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE lesson_id = $1 ORDER BY created_at DESC"
        ))
        .bind(lesson_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    pub async fn get_comments_by_user(db: &PgPool, user_id: i32) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    /// Updates a comment. Only the author may edit it.
    pub async fn update_comment(
        db: &PgPool,
        id: i32,
        user_id: i32,
        dto: UpdateCommentDto,
    ) -> Result<Comment, AppError> {
        let existing = Self::get_comment(db, id).await?;
        if existing.user_id != user_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Only the author can edit this comment"
            )));
        }

        let mut tx = db.begin().await?;

        let comment = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET
                year = COALESCE($1, year),
                term = COALESCE($2, term),
                comment = COALESCE($3, comment),
                test_or_report = COALESCE($4, test_or_report),
                star = COALESCE($5, star),
                updated_at = now()
             WHERE id = $6
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(dto.year)
        .bind(&dto.term)
        .bind(&dto.comment)
        .bind(&dto.test_or_report)
        .bind(dto.star)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        Self::refresh_lesson_stats(&mut tx, comment.lesson_id).await?;
        tx.commit().await?;

        Ok(comment)
    }

    /// Deletes a comment. Only the author may remove it.
    pub async fn delete_comment(db: &PgPool, id: i32, user_id: i32) -> Result<(), AppError> {
        let existing = Self::get_comment(db, id).await?;
        if existing.user_id != user_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Only the author can delete this comment"
            )));
        }

        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::refresh_lesson_stats(&mut tx, existing.lesson_id).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Recomputes the denormalized rating columns on the lesson row from
    /// its current comments.
    async fn refresh_lesson_stats(
        tx: &mut Transaction<'_, Postgres>,
        lesson_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE lessons SET
                avg_star = COALESCE((SELECT AVG(star)::real FROM comments WHERE lesson_id = $1), 0),
                about_avg_star = COALESCE((SELECT ROUND(AVG(star))::int FROM comments WHERE lesson_id = $1), 0),
                comment_numbers = (SELECT COUNT(*)::int FROM comments WHERE lesson_id = $1),
                updated_at = now()
             WHERE id = $1",
        )
        .bind(lesson_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
