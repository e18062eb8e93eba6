//! HTTP boundary: actix-web routes over the attendance, registry and report
//! operations. Every database call runs inside `web::block`.

mod attendance;
mod error;
mod stats;
mod students;

pub use students::RecentLimit;

use crate::config::Config;
use crate::core::ReportWindow;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use actix_web::{App, HttpServer, middleware, web};
use env_logger::Env;
use log::info;

/// Mount every API scope plus the JSON error handling on `cfg`.
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .service(students::configure_routes())
    .service(attendance::configure_routes())
    .service(stats::configure_routes());
}

/// Start the server and block until it shuts down (Ctrl-C).
pub fn run(pool: DbPool, cfg: &Config, host: &str, port: u16) -> AppResult<()> {
    // a second init (tests, embedding) is harmless
    let _ = env_logger::try_init_from_env(Env::default().default_filter_or("info"));

    let window = cfg.report_window();
    let recent = RecentLimit(cfg.recent_activity_limit);
    let addr = (host.to_string(), port);

    info!(
        "Serving {} on http://{}:{}",
        pool.path().display(),
        host,
        port
    );

    actix_web::rt::System::new()
        .block_on(serve(pool, window, recent, addr))
        .map_err(|e| AppError::Server(format!("{host}:{port}: {e}")))
}

async fn serve(
    pool: DbPool,
    window: ReportWindow,
    recent: RecentLimit,
    addr: (String, u16),
) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(window))
            .app_data(web::Data::new(recent))
            .configure(api)
    })
    .bind(addr)?
    .run()
    .await
}
