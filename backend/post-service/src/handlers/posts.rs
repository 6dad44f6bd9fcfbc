/// Post handlers - HTTP endpoints for the ordered collection
use crate::error::{AppError, Result};
use crate::services::PostCollection;
use actix_web::{web, HttpResponse};
use post_common::models::{MSG_CREATED, MSG_DELETED, MSG_REORDERED, MSG_UPDATED};
use post_common::{
    NewPost, Post, PostEnvelope, PostMessage, PostPatch, PostsEnvelope, PostsMessage,
};

/// List every post in stored order
/// GET /posts
pub async fn list_posts(posts: web::Data<PostCollection>) -> Result<HttpResponse> {
    let posts = posts.list().await?;
    Ok(HttpResponse::Ok().json(PostsEnvelope { posts }))
}

/// Get a post by ID
/// GET /posts/{post_id}
///
/// Unknown ids answer 200 with the `post` key absent.
pub async fn get_post(
    posts: web::Data<PostCollection>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = match posts.get(&post_id).await {
        Ok(post) => Some(post),
        Err(AppError::NotFound) => None,
        Err(e) => return Err(e),
    };
    Ok(HttpResponse::Ok().json(PostEnvelope { post }))
}

/// Create a new post at the front of the collection
/// POST /posts
pub async fn create_post(
    posts: web::Data<PostCollection>,
    req: web::Json<NewPost>,
) -> Result<HttpResponse> {
    let post = posts.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(PostMessage {
        message: MSG_CREATED.to_string(),
        post,
    }))
}

/// Update a post in place
/// PUT /posts/{post_id}
pub async fn update_post(
    posts: web::Data<PostCollection>,
    post_id: web::Path<String>,
    req: web::Json<PostPatch>,
) -> Result<HttpResponse> {
    let post = posts.update(&post_id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostMessage {
        message: MSG_UPDATED.to_string(),
        post,
    }))
}

/// Delete a post
/// DELETE /posts/{post_id}
pub async fn delete_post(
    posts: web::Data<PostCollection>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = posts.delete(&post_id).await?;
    Ok(HttpResponse::Ok().json(PostMessage {
        message: MSG_DELETED.to_string(),
        post,
    }))
}

/// Replace the whole collection with the submitted order
/// PUT /posts
pub async fn reorder_posts(
    posts: web::Data<PostCollection>,
    req: web::Json<Vec<Post>>,
) -> Result<HttpResponse> {
    let posts = posts.reorder(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostsMessage {
        message: MSG_REORDERED.to_string(),
        posts,
    }))
}
