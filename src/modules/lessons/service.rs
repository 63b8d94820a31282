use sqlx::PgPool;

use crate::modules::lessons::model::{CreateLessonDto, Lesson, LessonSort, UpdateLessonDto};
use crate::utils::errors::AppError;

const LESSON_COLUMNS: &str =
    "id, lesson_name, teacher_name, avg_star, about_avg_star, comment_numbers, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    pub async fn create_lesson(db: &PgPool, dto: CreateLessonDto) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (lesson_name, teacher_name, avg_star, about_avg_star, comment_numbers)
             VALUES ($1, $2, 0, 0, 0)
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(&dto.lesson_name)
        .bind(&dto.teacher_name)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    pub async fn get_lesson(db: &PgPool, id: i32) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson with id {} not found", id)))?;

        Ok(lesson)
    }

    pub async fn get_lessons(db: &PgPool, sort: LessonSort) -> Result<Vec<Lesson>, AppError> {
        // Sort column picked from a fixed set, never interpolated from input.
        let order_by = match sort {
            LessonSort::Name => "lesson_name",
            LessonSort::Stars => "avg_star DESC, lesson_name",
        };

        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons ORDER BY {order_by}"
        ))
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    /// Lessons the given user has commented on, for the "my lessons" view.
    pub async fn get_lessons_by_commenter(
        db: &PgPool,
        user_id: i32,
    ) -> Result<Vec<Lesson>, AppError> {
        let lessons = sqlx::query_as::<_, Lesson>(
            "SELECT DISTINCT l.id, l.lesson_name, l.teacher_name, l.avg_star,
                    l.about_avg_star, l.comment_numbers, l.created_at, l.updated_at
             FROM lessons l
             JOIN comments c ON c.lesson_id = l.id
             WHERE c.user_id = $1
             ORDER BY l.lesson_name",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    pub async fn update_lesson(
        db: &PgPool,
        id: i32,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE lessons SET
                lesson_name = COALESCE($1, lesson_name),
                teacher_name = COALESCE($2, teacher_name),
                updated_at = now()
             WHERE id = $3
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(&dto.lesson_name)
        .bind(&dto.teacher_name)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson with id {} not found", id)))?;

        Ok(lesson)
    }
}
