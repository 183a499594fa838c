/// Post service - listings, detail, creation and author-only editing
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::forms::{FormErrors, PostForm};
use crate::metrics::record_write;
use crate::middleware::CurrentUser;
use crate::models::{Comment, Group, Post, PostDraft, PostFilter, User};
use crate::pagination::{Page, PageWindow, Paginator};
use crate::repository::BlogRepository;

/// Result of submitting a form: either persisted or sent back with errors.
#[derive(Debug)]
pub enum FormOutcome<T> {
    Saved(T),
    Invalid(FormErrors),
}

/// Whether the current user may open the edit form of a post.
#[derive(Debug)]
pub enum EditAccess {
    Allowed(Post),
    NotAuthor(Post),
}

#[derive(Debug)]
pub enum EditOutcome {
    Saved(Post),
    Invalid { post: Post, errors: FormErrors },
    /// Nothing was written; the caller redirects to the post
    NotAuthor(Post),
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub author: User,
    pub posts_count: usize,
    /// False for anonymous viewers
    pub following: bool,
    pub page: Page<Post>,
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: Post,
    /// Total posts written by the post's author
    pub posts_count: usize,
    pub comments: Vec<Comment>,
}

pub struct PostService {
    repo: Arc<dyn BlogRepository>,
    paginator: Paginator,
}

impl PostService {
    pub fn new(repo: Arc<dyn BlogRepository>, page_size: usize) -> Self {
        Self {
            repo,
            paginator: Paginator::new(page_size),
        }
    }

    /// One page of posts matching `filter`, newest first.
    pub async fn list_page(&self, filter: PostFilter, requested: i64) -> Result<Page<Post>> {
        let window = self.page_window(filter, requested).await?;
        self.fetch_page(filter, window).await
    }

    /// Clamped page position for `requested` against the current post count.
    pub async fn page_window(&self, filter: PostFilter, requested: i64) -> Result<PageWindow> {
        let total = self.repo.count_posts(filter).await?;
        Ok(self.paginator.window(total, requested))
    }

    pub async fn fetch_page(&self, filter: PostFilter, window: PageWindow) -> Result<Page<Post>> {
        let items = if window.limit == 0 {
            Vec::new()
        } else {
            self.repo
                .list_posts(filter, window.limit, window.offset)
                .await?
        };

        Ok(Page::new(window, items))
    }

    pub async fn group_page(&self, slug: &str, requested: i64) -> Result<(Group, Page<Post>)> {
        let group = self
            .repo
            .find_group_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("group '{}'", slug)))?;

        let page = self.list_page(PostFilter::Group(group.id), requested).await?;
        Ok((group, page))
    }

    pub async fn profile_page(
        &self,
        username: &str,
        viewer: Option<&CurrentUser>,
        requested: i64,
    ) -> Result<ProfilePage> {
        let author = self
            .repo
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user '{}'", username)))?;

        let page = self.list_page(PostFilter::Author(author.id), requested).await?;
        let following = match viewer {
            Some(viewer) => self.repo.is_following(viewer.id, author.id).await?,
            None => false,
        };

        Ok(ProfilePage {
            posts_count: page.count,
            author,
            following,
            page,
        })
    }

    /// Posts of every author `user_id` follows.
    pub async fn follow_feed(&self, user_id: Uuid, requested: i64) -> Result<Page<Post>> {
        self.list_page(PostFilter::FollowedBy(user_id), requested).await
    }

    pub async fn post_detail(&self, post_id: i64) -> Result<PostDetail> {
        let post = self.get_post(post_id).await?;
        let posts_count = self
            .repo
            .count_posts(PostFilter::Author(post.author_id))
            .await?;
        let comments = self.repo.list_comments(post_id).await?;

        Ok(PostDetail {
            post,
            posts_count,
            comments,
        })
    }

    pub async fn group_choices(&self) -> Result<Vec<Group>> {
        self.repo.list_groups().await
    }

    pub async fn create_post(&self, author: &CurrentUser, form: PostForm) -> Result<FormOutcome<Post>> {
        let draft = match self.clean_form(form).await? {
            Ok(draft) => draft,
            Err(errors) => return Ok(FormOutcome::Invalid(errors)),
        };

        let post = self.repo.create_post(author.id, &draft).await?;
        record_write("post_created");
        tracing::info!(
            post_id = post.id,
            author = %author.username,
            preview = %post.preview(),
            "post created"
        );

        Ok(FormOutcome::Saved(post))
    }

    pub async fn edit_access(&self, post_id: i64, editor: &CurrentUser) -> Result<EditAccess> {
        let post = self.get_post(post_id).await?;
        if post.is_authored_by(editor.id) {
            Ok(EditAccess::Allowed(post))
        } else {
            Ok(EditAccess::NotAuthor(post))
        }
    }

    pub async fn edit_post(
        &self,
        post_id: i64,
        editor: &CurrentUser,
        form: PostForm,
    ) -> Result<EditOutcome> {
        let post = match self.edit_access(post_id, editor).await? {
            EditAccess::Allowed(post) => post,
            EditAccess::NotAuthor(post) => {
                tracing::debug!(post_id, editor = %editor.username, "edit refused: not the author");
                return Ok(EditOutcome::NotAuthor(post));
            }
        };

        let draft = match self.clean_form(form).await? {
            Ok(draft) => draft,
            Err(errors) => return Ok(EditOutcome::Invalid { post, errors }),
        };

        let updated = self
            .repo
            .update_post(post_id, &draft)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {}", post_id)))?;
        record_write("post_updated");
        tracing::info!(post_id, author = %editor.username, "post updated");

        Ok(EditOutcome::Saved(updated))
    }

    async fn get_post(&self, post_id: i64) -> Result<Post> {
        self.repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {}", post_id)))
    }

    /// Field validation plus the group lookup.
    async fn clean_form(&self, form: PostForm) -> Result<std::result::Result<PostDraft, FormErrors>> {
        let form = form.normalized();
        let draft = match form.clean() {
            Ok(draft) => draft,
            Err(errors) => return Ok(Err(errors)),
        };

        if let Some(group_id) = draft.group_id {
            if self.repo.find_group_by_id(group_id).await?.is_none() {
                let mut errors = FormErrors::default();
                errors.add("group", "Select a valid choice.");
                return Ok(Err(errors));
            }
        }

        Ok(Ok(draft))
    }
}
