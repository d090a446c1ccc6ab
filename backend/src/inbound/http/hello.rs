//! Static greeting used as a smoke check.

use actix_web::get;

#[get("/hello")]
pub async fn hello() -> &'static str {
    "Hello, World!"
}
