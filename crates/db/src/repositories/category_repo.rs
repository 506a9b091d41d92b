//! Repository for the `categories` and `training_courses` reference tables.

use sqlx::PgPool;

use skillforge_core::types::DbId;

use crate::models::category::{Category, CreateCategory, CreateTrainingCourse, TrainingCourse};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at";
const COURSE_COLUMNS: &str = "id, category_id, title, description, created_at";

/// Read-mostly access to the category/course catalog.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn create_category(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_category(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    pub async fn create_course(
        pool: &PgPool,
        input: &CreateTrainingCourse,
    ) -> Result<TrainingCourse, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_courses (category_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, TrainingCourse>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_course(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingCourse>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM training_courses WHERE id = $1");
        sqlx::query_as::<_, TrainingCourse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of courses in a category; used to seed `total_courses` when a
    /// completion record is created without an explicit count.
    pub async fn count_courses_in_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM training_courses WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
