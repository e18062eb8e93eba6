//! `/api/stats`: dashboard aggregates.

use crate::core::{ReportLogic, ReportWindow};
use crate::db::pool::DbPool;
use crate::errors::AppError;
use actix_web::web::{self, get, scope};
use actix_web::{HttpResponse, Scope};

const API_PATH: &str = "/api/stats";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(stats))
}

async fn stats(
    pool: web::Data<DbPool>,
    window: web::Data<ReportWindow>,
) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref().clone();
    let window = *window.get_ref();
    let stats = web::block(move || ReportLogic::stats(&pool, window)).await??;
    Ok(HttpResponse::Ok().json(stats))
}
