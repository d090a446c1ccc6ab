//! Post listing and author-only mutation handlers.
//!
//! ```text
//! GET      /              (named `index`)
//! GET|POST /create
//! GET|POST /{id}/update
//! POST     /{id}/delete
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{Error, PostDraft, PostId, PostValidationError};

use super::context::{Authenticated, RequestContext, redirect_to_index};
use super::error::HttpResult;
use super::views::{FormValues, create_page, index_page, update_page};

/// Title and body as submitted by the create and update forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

impl PostForm {
    fn draft(&self) -> Result<PostDraft, Error> {
        PostDraft::try_new(self.title.as_str(), self.body.as_str())
            .map_err(map_post_validation_error)
    }

    fn echo(&self) -> FormValues {
        FormValues {
            first: self.title.clone(),
            second: self.body.clone(),
        }
    }
}

fn map_post_validation_error(err: PostValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Every post, newest first. Public.
#[get("/", name = "index")]
pub async fn index(mut ctx: RequestContext) -> HttpResult<HttpResponse> {
    let posts = ctx.posts().list().await?;
    Ok(ctx.page(|layout| index_page(layout, &posts)))
}

#[get("/create")]
pub async fn create_form(auth: Authenticated) -> HttpResponse {
    auth.context()
        .page(|layout| create_page(layout, &FormValues::default()))
}

#[post("/create")]
pub async fn create(
    req: HttpRequest,
    mut auth: Authenticated,
    form: web::Form<PostForm>,
) -> HttpResult<HttpResponse> {
    let author = auth.user().id();
    let ctx = auth.context_mut();
    let outcome = match form.draft() {
        Ok(draft) => ctx.posts().create(author, &draft).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => redirect_to_index(&req),
        Err(err) => ctx.redisplay(err, |layout| create_page(layout, &form.echo())),
    }
}

/// Edit form for the caller's own post; 404 or 403 otherwise.
#[get("/{id}/update")]
pub async fn update_form(
    mut auth: Authenticated,
    path: web::Path<i32>,
) -> HttpResult<HttpResponse> {
    let user = auth.user().id();
    let ctx = auth.context_mut();
    let owned = ctx.posts().get_owned(PostId::new(path.into_inner()), user).await?;
    let post = owned.post();
    let values = FormValues {
        first: post.title().to_owned(),
        second: post.body().to_owned(),
    };
    Ok(ctx.page(|layout| update_page(layout, post, &values)))
}

/// Ownership is checked before the submission is validated.
#[post("/{id}/update")]
pub async fn update(
    req: HttpRequest,
    mut auth: Authenticated,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> HttpResult<HttpResponse> {
    let user = auth.user().id();
    let ctx = auth.context_mut();
    let owned = ctx.posts().get_owned(PostId::new(path.into_inner()), user).await?;
    let outcome = match form.draft() {
        Ok(draft) => ctx.posts().update(&owned, &draft).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => redirect_to_index(&req),
        Err(err) => ctx.redisplay(err, |layout| {
            update_page(layout, owned.post(), &form.echo())
        }),
    }
}

#[post("/{id}/delete")]
pub async fn delete(
    req: HttpRequest,
    mut auth: Authenticated,
    path: web::Path<i32>,
) -> HttpResult<HttpResponse> {
    let user = auth.user().id();
    let ctx = auth.context_mut();
    let owned = ctx.posts().get_owned(PostId::new(path.into_inner()), user).await?;
    ctx.posts().delete(owned).await?;
    redirect_to_index(&req)
}
