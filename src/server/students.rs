//! `/api/students`: registry endpoints.

use crate::core::StudentLogic;
use crate::db::pool::DbPool;
use crate::errors::AppError;
use crate::models::student::NewStudent;
use actix_web::web::{self, get, post, put, scope};
use actix_web::{HttpResponse, Scope};
use serde::Deserialize;
use serde_json::json;

const API_PATH: &str = "/api/students";

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
struct ProfileQuery {
    limit: Option<u32>,
}

#[derive(Deserialize)]
struct ImageBody {
    #[serde(default)]
    profile_image: String,
}

/// Registered routes:
///
/// * `GET /`: every student, by last then first name
/// * `POST /`: register a student (201)
/// * `GET /search?q=`: exact id or name fragment
/// * `GET /profile/{student_id}`: student plus recent visits
/// * `PUT /{student_id}/image`: set the profile image reference
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list))
        .route("", post().to(register))
        .route("/search", get().to(search))
        .route("/profile/{student_id}", get().to(profile))
        .route("/{student_id}/image", put().to(set_image))
}

async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let students = web::block(move || StudentLogic::list(&pool)).await??;
    Ok(HttpResponse::Ok().json(students))
}

async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<NewStudent>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let student = web::block(move || StudentLogic::register(&pool, body.into_inner())).await??;
    Ok(HttpResponse::Created().json(student))
}

async fn search(
    pool: web::Data<DbPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let term = query.into_inner().q;
    let students = web::block(move || StudentLogic::search(&pool, &term)).await??;
    Ok(HttpResponse::Ok().json(students))
}

async fn profile(
    pool: web::Data<DbPool>,
    limit: web::Data<RecentLimit>,
    path: web::Path<String>,
    query: web::Query<ProfileQuery>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let student_id = path.into_inner();
    let limit = query.limit.unwrap_or(limit.0);
    let profile = web::block(move || StudentLogic::profile(&pool, &student_id, limit)).await??;
    Ok(HttpResponse::Ok().json(profile))
}

async fn set_image(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ImageBody>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let student_id = path.into_inner();
    let image = body.into_inner().profile_image;
    let stored = image.clone();
    web::block(move || StudentLogic::set_profile_image(&pool, &student_id, &image)).await??;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile image updated",
        "imagePath": stored,
    })))
}

/// Default number of visits on a profile page.
#[derive(Debug, Clone, Copy)]
pub struct RecentLimit(pub u32);
