use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::BlogRepository;
use crate::error::Result;
use crate::models::{Comment, Group, Post, PostDraft, PostFilter, User};

const POST_COLUMNS: &str = r#"
    p.id, p.text, p.pub_date, p.author_id, u.username AS author_username,
    p.group_id, g.slug AS group_slug, g.title AS group_title, p.image
"#;

const POST_JOINS: &str = r#"
    JOIN users u ON u.id = p.author_id
    LEFT JOIN groups g ON g.id = p.group_id
"#;

/// PostgreSQL repository (source of truth)
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: PostFilter) {
        match filter {
            PostFilter::All => {}
            PostFilter::Group(group_id) => {
                query.push(" WHERE p.group_id = ").push_bind(group_id);
            }
            PostFilter::Author(author_id) => {
                query.push(" WHERE p.author_id = ").push_bind(author_id);
            }
            PostFilter::FollowedBy(user_id) => {
                query
                    .push(" JOIN follows f ON f.author_id = p.author_id WHERE f.user_id = ")
                    .push_bind(user_id);
            }
        }
    }
}

#[async_trait::async_trait]
impl BlogRepository for PostgresRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM groups WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    async fn find_group_by_id(&self, group_id: i64) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM groups WHERE id = $1",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM groups ORDER BY title, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    async fn count_posts(&self, filter: PostFilter) -> Result<usize> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
        Self::push_filter(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as usize)
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(POST_COLUMNS).push(" FROM posts p ").push(POST_JOINS);
        Self::push_filter(&mut query, filter);
        query
            .push(" ORDER BY p.pub_date DESC, p.id DESC LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset as i64);

        let posts = query.build_query_as::<Post>().fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn find_post(&self, post_id: i64) -> Result<Option<Post>> {
        let sql = format!(
            "SELECT {} FROM posts p {} WHERE p.id = $1",
            POST_COLUMNS, POST_JOINS
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn create_post(&self, author_id: Uuid, draft: &PostDraft) -> Result<Post> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (text, author_id, group_id, image)
                VALUES ($1, $2, $3, $4)
                RETURNING id, text, pub_date, author_id, group_id, image
            )
            SELECT {} FROM p {}
            "#,
            POST_COLUMNS, POST_JOINS
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(draft.text.as_str())
            .bind(author_id)
            .bind(draft.group_id)
            .bind(draft.image.as_deref())
            .fetch_one(&self.pool)
            .await?;

        debug!(post_id = post.id, %author_id, "inserted post");
        Ok(post)
    }

    async fn update_post(&self, post_id: i64, draft: &PostDraft) -> Result<Option<Post>> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE posts
                SET text = $1, group_id = $2, image = $3
                WHERE id = $4
                RETURNING id, text, pub_date, author_id, group_id, image
            )
            SELECT {} FROM p {}
            "#,
            POST_COLUMNS, POST_JOINS
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(draft.text.as_str())
            .bind(draft.group_id)
            .bind(draft.image.as_deref())
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT c.id, c.post_id, c.author_id, u.username AS author_username, c.text, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn create_comment(&self, post_id: i64, author_id: Uuid, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            WITH c AS (
                INSERT INTO comments (post_id, author_id, text)
                VALUES ($1, $2, $3)
                RETURNING id, post_id, author_id, text, created
            )
            SELECT c.id, c.post_id, c.author_id, u.username AS author_username, c.text, c.created
            FROM c
            JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query_as::<_, (i64,)>(
            r#"
            INSERT INTO follows (user_id, author_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, author_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }

    async fn delete_follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
