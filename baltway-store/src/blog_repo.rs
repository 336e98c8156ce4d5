use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use baltway_core::blog::{self, BlogPost, NewBlogPost, UpdateBlogPost};
use baltway_core::repository::{BlogRepository, StoreError};

pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BlogPostRow {
    id: i32,
    title: String,
    slug: String,
    content: String,
    excerpt: String,
    image: Option<String>,
    fallback_image: String,
    published_at: DateTime<Utc>,
    read_time: String,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        BlogPost {
            id: row.id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            excerpt: row.excerpt,
            image: row.image,
            fallback_image: row.fallback_image,
            published_at: row.published_at,
            read_time: row.read_time,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, title, slug, content, excerpt, image, fallback_image, \
                       published_at, read_time, is_published, created_at, updated_at";

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Map a unique-constraint violation on the slug column to the domain
/// error; everything else is a backend failure.
fn map_insert_err(slug: &str, e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return StoreError::DuplicateSlug(slug.to_string());
        }
    }
    backend(e)
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let rows: Vec<BlogPostRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM blog_posts ORDER BY published_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<BlogPost, StoreError> {
        let row: Option<BlogPostRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

        row.map(Into::into).ok_or(StoreError::NotFound)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<BlogPost, StoreError> {
        let row: Option<BlogPostRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

        row.map(Into::into).ok_or(StoreError::NotFound)
    }

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, StoreError> {
        let slug = match post.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => blog::slugify(&post.title),
        };
        let fallback_image = post
            .fallback_image
            .unwrap_or_else(|| blog::DEFAULT_FALLBACK_IMAGE.to_string());
        let published_at = post.published_at.unwrap_or_else(Utc::now);
        let read_time = post.read_time.unwrap_or_else(|| "5 min".to_string());

        let row: BlogPostRow = sqlx::query_as(&format!(
            "INSERT INTO blog_posts \
             (title, slug, content, excerpt, image, fallback_image, published_at, read_time, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        ))
        .bind(&post.title)
        .bind(&slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.image)
        .bind(&fallback_image)
        .bind(published_at)
        .bind(&read_time)
        .bind(post.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(&slug, e))?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, changes: UpdateBlogPost) -> Result<BlogPost, StoreError> {
        let existing = self.find_by_id(id).await?;

        // A slug change colliding with a different post is a conflict.
        if let Some(slug) = &changes.slug {
            if slug != &existing.slug {
                match self.find_by_slug(slug).await {
                    Ok(other) if other.id != id => {
                        return Err(StoreError::DuplicateSlug(slug.clone()));
                    }
                    Ok(_) | Err(StoreError::NotFound) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        let slug = changes.slug.unwrap_or(existing.slug);
        let row: BlogPostRow = sqlx::query_as(&format!(
            "UPDATE blog_posts SET \
             title = $1, slug = $2, content = $3, excerpt = $4, image = $5, \
             fallback_image = $6, published_at = $7, read_time = $8, is_published = $9, \
             updated_at = NOW() \
             WHERE id = $10 \
             RETURNING {COLUMNS}"
        ))
        .bind(changes.title.unwrap_or(existing.title))
        .bind(&slug)
        .bind(changes.content.unwrap_or(existing.content))
        .bind(changes.excerpt.unwrap_or(existing.excerpt))
        .bind(changes.image.or(existing.image))
        .bind(changes.fallback_image.unwrap_or(existing.fallback_image))
        .bind(changes.published_at.unwrap_or(existing.published_at))
        .bind(changes.read_time.unwrap_or(existing.read_time))
        .bind(changes.is_published.unwrap_or(existing.is_published))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(&slug, e))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
