//! Server-rendered HTML pages.
//!
//! Every page shares one layout: navigation that reflects the current user,
//! any pending flash messages, then the page body. Pages are `maud`
//! templates, so interpolated user text is escaped when rendered.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::domain::{Post, User};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Chrome shared by every page.
pub struct Layout<'a> {
    pub user: Option<&'a User>,
    pub flashes: &'a [String],
}

impl Layout<'_> {
    /// Wrap `body` in the full document.
    #[must_use]
    pub fn render(&self, title: &str, body: &Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (title) " - Flaskr" }
                }
                body {
                    nav {
                        h1 { a href="/" { "Flaskr" } }
                        ul {
                            @if let Some(user) = self.user {
                                li { span { (user.username().as_ref()) } }
                                li { a href="/auth/logout" { "Log Out" } }
                            } @else {
                                li { a href="/auth/register" { "Register" } }
                                li { a href="/auth/login" { "Log In" } }
                            }
                        }
                    }
                    section.content {
                        header { h1 { (title) } }
                        @for message in self.flashes {
                            div.flash { (message) }
                        }
                        (body)
                    }
                }
            }
        }
    }
}

/// Return `page` with the given status and an HTML content type.
#[must_use]
pub fn html_response(status: StatusCode, page: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(HTML_CONTENT_TYPE)
        .body(page.into_string())
}

/// Values echoed back into a form after a failed submission.
#[derive(Debug, Default, Clone)]
pub struct FormValues {
    pub first: String,
    pub second: String,
}

/// Username and password form shared by register and log in.
#[must_use]
pub fn credentials_form(
    layout: &Layout<'_>,
    title: &str,
    action: &str,
    values: &FormValues,
) -> Markup {
    let body = html! {
        form method="post" action=(action) {
            label for="username" { "Username" }
            input name="username" id="username" value=(values.first) required;
            label for="password" { "Password" }
            input type="password" name="password" id="password" required;
            input type="submit" value=(title);
        }
    };
    layout.render(title, &body)
}

/// Post listing; edit links appear only on the viewer's own posts.
#[must_use]
pub fn index_page(layout: &Layout<'_>, posts: &[Post]) -> Markup {
    let viewer = layout.user.map(User::id);
    let body = html! {
        @if viewer.is_some() {
            a.action href="/create" { "New" }
        }
        @for post in posts {
            article.post {
                header {
                    div {
                        h1 { (post.title()) }
                        div.about {
                            "by " (post.author_username().as_ref())
                            " on " (post.created().format("%Y-%m-%d").to_string())
                        }
                    }
                    @if viewer.is_some_and(|id| post.is_authored_by(id)) {
                        a.action href=(format!("/{}/update", post.id())) { "Edit" }
                    }
                }
                p.body { (post.body()) }
            }
            hr;
        }
    };
    layout.render("Posts", &body)
}

/// Title and body form for creating a post.
#[must_use]
pub fn create_page(layout: &Layout<'_>, values: &FormValues) -> Markup {
    let body = html! {
        form method="post" {
            (post_fields(values))
            input type="submit" value="Save";
        }
    };
    layout.render("New Post", &body)
}

/// Edit form plus a separate delete form for an existing post.
#[must_use]
pub fn update_page(layout: &Layout<'_>, post: &Post, values: &FormValues) -> Markup {
    let body = html! {
        form method="post" {
            (post_fields(values))
            input type="submit" value="Save";
        }
        hr;
        form action=(format!("/{}/delete", post.id())) method="post" {
            input.danger type="submit" value="Delete"
                onclick="return confirm('Are you sure?');";
        }
    };
    layout.render(&format!("Edit \"{}\"", post.title()), &body)
}

fn post_fields(values: &FormValues) -> Markup {
    html! {
        label for="title" { "Title" }
        input name="title" id="title" value=(values.first) required;
        label for="body" { "Body" }
        textarea name="body" id="body" { (values.second) }
    }
}

/// Standalone page for hard errors (403, 404, 5xx).
#[must_use]
pub fn error_page(status: StatusCode, message: &str, trace_id: Option<&str>) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (status.as_u16()) " " (reason) }
            }
            body {
                h1 { (reason) }
                p { (message) }
                @if let Some(id) = trace_id {
                    p.trace { "Trace id: " (id) }
                }
            }
        }
    }
}
