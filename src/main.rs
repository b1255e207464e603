use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use chrono::Utc;
use discussion_service::config::Config;
use discussion_service::db;
use discussion_service::handlers;
use discussion_service::middleware::JwtAuthMiddleware;
use discussion_service::metrics;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: PgPool,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "discussion-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "discussion-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();

    let start = Instant::now();
    let (ready, check) = match state.check_postgres().await {
        Ok(_) => (
            true,
            ComponentCheck {
                status: ComponentStatus::Healthy,
                message: "connected".to_string(),
                latency_ms: Some(start.elapsed().as_millis() as u64),
            },
        ),
        Err(e) => (
            false,
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: e.to_string(),
                latency_ms: None,
            },
        ),
    };
    checks.insert("postgres".to_string(), check);

    let response = ReadinessResponse {
        ready,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "alive": true }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("info,discussion_service=debug")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        env = %config.app.env,
        host = %config.app.host,
        port = config.app.port,
        "starting discussion-service"
    );

    let db_pool = db::create_pool(&config.database)
        .await
        .context("failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("failed to run database migrations")?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });
    let feed_config = web::Data::new(config.feed.clone());
    let jwt_secret = config.auth.jwt_secret.clone();
    let cors_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(feed_config.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(metrics::serve_metrics))
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
                    .service(web::scope("/feed").route("", web::get().to(handlers::get_feed)))
                    .service(
                        web::scope("/votes")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::toggle_vote))
                                    .route(web::get().to(handlers::get_vote_state)),
                            ),
                    )
                    .service(
                        web::scope("/posts")
                            .service(web::resource("").route(web::post().to(handlers::create_post)))
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post)),
                            )
                            .service(
                                web::resource("/{post_id}/comments")
                                    .route(web::get().to(handlers::get_post_comments))
                                    .route(web::post().to(handlers::create_comment)),
                            ),
                    ),
            )
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .workers(config.app.workers)
    .run();

    tracing::info!("HTTP server is running on {}", bind_address);
    server.await?;

    tracing::info!("discussion-service shutting down");
    Ok(())
}
