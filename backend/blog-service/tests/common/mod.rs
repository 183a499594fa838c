//! Shared fixtures for the HTTP tests.
//!
//! `InMemoryRepository` stands in for PostgreSQL so the full actix stack can be
//! exercised without a database.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use blog_service::config::{
    AppConfig, AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, PaginationConfig,
};
use blog_service::middleware::issue_token;
use blog_service::models::{Comment, Group, Post, PostDraft, PostFilter, User};
use blog_service::repository::BlogRepository;
use blog_service::{AppState, Config, Result};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";
pub const LOGIN_URL: &str = "/auth/login/";

/// Directed user -> author edge.
struct FollowEdge {
    user_id: Uuid,
    author_id: Uuid,
}

#[derive(Default)]
struct Store {
    users: Vec<User>,
    groups: Vec<Group>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    follows: Vec<FollowEdge>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn matches(&self, post: &Post, filter: PostFilter) -> bool {
        match filter {
            PostFilter::All => true,
            PostFilter::Group(group_id) => post.group_id == Some(group_id),
            PostFilter::Author(author_id) => post.author_id == author_id,
            PostFilter::FollowedBy(user_id) => self
                .follows
                .iter()
                .any(|f| f.user_id == user_id && f.author_id == post.author_id),
        }
    }

    fn username(&self, user_id: Uuid) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn apply_group(&self, post: &mut Post, group_id: Option<i64>) {
        let group = group_id.and_then(|id| self.groups.iter().find(|g| g.id == id));
        post.group_id = group.map(|g| g.id);
        post.group_slug = group.map(|g| g.slug.clone());
        post.group_title = group.map(|g| g.title.clone());
    }
}

/// Thread-safe in-memory store with the same ordering rules as the SQL queries.
#[derive(Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
        };
        self.store.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_group(&self, title: &str, slug: &str) -> Group {
        let mut store = self.store.lock().unwrap();
        let group = Group {
            id: store.next_id(),
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("{} description", title),
        };
        store.groups.push(group.clone());
        group
    }

    pub fn add_post(&self, author: &User, text: &str, group: Option<&Group>) -> Post {
        let mut store = self.store.lock().unwrap();
        let mut post = Post {
            id: store.next_id(),
            text: text.to_string(),
            pub_date: Utc::now(),
            author_id: author.id,
            author_username: author.username.clone(),
            group_id: None,
            group_slug: None,
            group_title: None,
            image: None,
        };
        store.apply_group(&mut post, group.map(|g| g.id));
        store.posts.push(post.clone());
        post
    }

    pub fn delete_all_posts(&self) {
        let mut store = self.store.lock().unwrap();
        store.posts.clear();
        store.comments.clear();
    }

    pub fn post(&self, post_id: i64) -> Option<Post> {
        let store = self.store.lock().unwrap();
        store.posts.iter().find(|p| p.id == post_id).cloned()
    }

    /// Most recently inserted post.
    pub fn latest_post(&self) -> Option<Post> {
        let store = self.store.lock().unwrap();
        store.posts.iter().max_by_key(|p| p.id).cloned()
    }

    pub fn posts_count(&self) -> usize {
        self.store.lock().unwrap().posts.len()
    }

    pub fn comments_for(&self, post_id: i64) -> Vec<Comment> {
        let store = self.store.lock().unwrap();
        store
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn follows_count(&self) -> usize {
        self.store.lock().unwrap().follows.len()
    }

    pub fn has_follow(&self, user: &User, author: &User) -> bool {
        let store = self.store.lock().unwrap();
        store
            .follows
            .iter()
            .any(|f| f.user_id == user.id && f.author_id == author.id)
    }
}

#[async_trait]
impl BlogRepository for InMemoryRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        let store = self.store.lock().unwrap();
        Ok(store.groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn find_group_by_id(&self, group_id: i64) -> Result<Option<Group>> {
        let store = self.store.lock().unwrap();
        Ok(store.groups.iter().find(|g| g.id == group_id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let store = self.store.lock().unwrap();
        let mut groups = store.groups.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn count_posts(&self, filter: PostFilter) -> Result<usize> {
        let store = self.store.lock().unwrap();
        Ok(store
            .posts
            .iter()
            .filter(|p| store.matches(p, filter))
            .count())
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>> {
        let store = self.store.lock().unwrap();
        let mut posts: Vec<Post> = store
            .posts
            .iter()
            .filter(|p| store.matches(p, filter))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_post(&self, post_id: i64) -> Result<Option<Post>> {
        Ok(self.post(post_id))
    }

    async fn create_post(&self, author_id: Uuid, draft: &PostDraft) -> Result<Post> {
        let mut store = self.store.lock().unwrap();
        let mut post = Post {
            id: store.next_id(),
            text: draft.text.clone(),
            pub_date: Utc::now(),
            author_id,
            author_username: store.username(author_id),
            group_id: None,
            group_slug: None,
            group_title: None,
            image: draft.image.clone(),
        };
        store.apply_group(&mut post, draft.group_id);
        store.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, post_id: i64, draft: &PostDraft) -> Result<Option<Post>> {
        let mut store = self.store.lock().unwrap();
        let Some(index) = store.posts.iter().position(|p| p.id == post_id) else {
            return Ok(None);
        };

        let mut post = store.posts[index].clone();
        post.text = draft.text.clone();
        post.image = draft.image.clone();
        store.apply_group(&mut post, draft.group_id);
        store.posts[index] = post.clone();
        Ok(Some(post))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        Ok(self.comments_for(post_id))
    }

    async fn create_comment(&self, post_id: i64, author_id: Uuid, text: &str) -> Result<Comment> {
        let mut store = self.store.lock().unwrap();
        let comment = Comment {
            id: store.next_id(),
            post_id,
            author_id,
            author_username: store.username(author_id),
            text: text.to_string(),
            created: Utc::now(),
        };
        store.comments.push(comment.clone());
        Ok(comment)
    }

    async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let store = self.store.lock().unwrap();
        Ok(store
            .follows
            .iter()
            .any(|f| f.user_id == user_id && f.author_id == author_id))
    }

    async fn create_follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let mut store = self.store.lock().unwrap();
        if store
            .follows
            .iter()
            .any(|f| f.user_id == user_id && f.author_id == author_id)
        {
            return Ok(false);
        }
        store.follows.push(FollowEdge { user_id, author_id });
        Ok(true)
    }

    async fn delete_follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.follows.len();
        store
            .follows
            .retain(|f| !(f.user_id == user_id && f.author_id == author_id));
        Ok(store.follows.len() < before)
    }
}

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        cors: CorsConfig {
            allowed_origins: "http://localhost:3000".to_string(),
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/blog_test".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            login_url: LOGIN_URL.to_string(),
        },
        pagination: PaginationConfig { page_size: 10 },
        cache: CacheConfig {
            index_ttl_secs: 20,
            admin_token: Some(TEST_ADMIN_TOKEN.to_string()),
        },
    }
}

pub fn build_state(repo: Arc<InMemoryRepository>, config: Config) -> AppState {
    AppState::new(repo, config)
}

pub fn token_for(user: &User) -> String {
    issue_token(user.id, &user.username, TEST_JWT_SECRET, 3600).expect("issue test token")
}

pub fn bearer(user: &User) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token_for(user)),
    )
}

pub fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Build the application service the same way `main` wires it.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(blog_service::middleware::SessionAuthMiddleware::new(
                    common::TEST_JWT_SECRET,
                ))
                .configure(blog_service::handlers::configure)
                .default_service(actix_web::web::to(blog_service::handlers::not_found)),
        )
        .await
    };
}
