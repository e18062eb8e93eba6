//! `/api/attendance`: check-in/check-out lifecycle and the activity export.

use crate::core::{AttendanceLogic, ReportLogic};
use crate::db::pool::DbPool;
use crate::errors::AppError;
use actix_web::web::{self, get, post, scope};
use actix_web::{HttpResponse, Scope};
use serde::Deserialize;
use serde_json::json;

const API_PATH: &str = "/api/attendance";

#[derive(Deserialize)]
struct CheckInBody {
    #[serde(default)]
    student_id: String,
    #[serde(default)]
    purpose: String,
}

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/checkin", post().to(check_in))
        .route("/checkout/{id}", post().to(check_out))
        .route("/active", get().to(active))
        .route("/export", get().to(export))
}

async fn check_in(
    pool: web::Data<DbPool>,
    body: web::Json<CheckInBody>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let CheckInBody {
        student_id,
        purpose,
    } = body.into_inner();
    let receipt =
        web::block(move || AttendanceLogic::check_in(&pool, &student_id, &purpose)).await??;
    Ok(HttpResponse::Created().json(receipt))
}

/// Unknown or already-closed ids still answer 200.
async fn check_out(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let visit_id = path.into_inner();
    let receipt = web::block(move || AttendanceLogic::check_out(&pool, visit_id)).await??;
    Ok(HttpResponse::Ok().json(json!({ "message": receipt.message })))
}

async fn active(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let visits = web::block(move || AttendanceLogic::list_active(&pool)).await??;
    Ok(HttpResponse::Ok().json(visits))
}

async fn export(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let report = web::block(move || ReportLogic::export_report(&pool)).await??;
    Ok(HttpResponse::Ok().json(report))
}
