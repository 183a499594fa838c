#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use std::sync::Arc;

use common::{bearer, build_state, location, test_config, InMemoryRepository};

#[actix_web::test]
async fn test_anonymous_comment_redirects_to_login() {
    let repo = Arc::new(InMemoryRepository::new());
    let author = repo.add_user("leo");
    let post = repo.add_post(&author, "Post", None);
    let app = init_app!(build_state(repo.clone(), test_config()));

    let uri = format!("/posts/{}/comment/", post.id);
    let req = test::TestRequest::post()
        .uri(&uri)
        .set_form([("text", "Anonymous words")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/auth/login/?next={}", uri));
    assert!(repo.comments_for(post.id).is_empty());
}

#[actix_web::test]
async fn test_comment_is_stored_and_redirects_to_detail() {
    let repo = Arc::new(InMemoryRepository::new());
    let author = repo.add_user("leo");
    let reader = repo.add_user("reader");
    let post = repo.add_post(&author, "Post", None);
    let app = init_app!(build_state(repo.clone(), test_config()));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comment/", post.id))
        .insert_header(bearer(&reader))
        .set_form([("text", " Great post ")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let comments = repo.comments_for(post.id);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "Great post");
    assert_eq!(comments[0].author_id, reader.id);
}

#[actix_web::test]
async fn test_blank_comment_is_dropped_but_still_redirects() {
    let repo = Arc::new(InMemoryRepository::new());
    let author = repo.add_user("leo");
    let post = repo.add_post(&author, "Post", None);
    let app = init_app!(build_state(repo.clone(), test_config()));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comment/", post.id))
        .insert_header(bearer(&author))
        .set_form([("text", "   ")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));
    assert!(repo.comments_for(post.id).is_empty());
}

#[actix_web::test]
async fn test_comment_on_missing_post_is_not_found() {
    let repo = Arc::new(InMemoryRepository::new());
    let reader = repo.add_user("reader");
    let app = init_app!(build_state(repo.clone(), test_config()));

    let req = test::TestRequest::post()
        .uri("/posts/424242/comment/")
        .insert_header(bearer(&reader))
        .set_form([("text", "Hello?")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_comment_without_form_body_is_dropped_or_not_found() {
    let repo = Arc::new(InMemoryRepository::new());
    let author = repo.add_user("leo");
    let post = repo.add_post(&author, "Post", None);
    let app = init_app!(build_state(repo.clone(), test_config()));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comment/", post.id))
        .insert_header(bearer(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));
    assert!(repo.comments_for(post.id).is_empty());

    let req = test::TestRequest::post()
        .uri("/posts/424242/comment/")
        .insert_header(bearer(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
