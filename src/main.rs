mod api;
mod database;
mod jobs;
mod middleware;
mod models;
mod seeds;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use services::SessionManager;
use std::env;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting Incubator Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // 🌱 Seed the bootstrap admin account
    seeds::admin_seed::seed_admin_user(&db).await;

    // ⏱️ Session keep-alive: explicitly owned, started with the server
    let session_manager = Arc::new(SessionManager::new());
    session_manager.start(db.clone());
    let session_data = web::Data::from(Arc::clone(&session_manager));

    // 📅 Start expired-token cleanup
    log::info!("📅 Starting background jobs...");
    jobs::token_cleanup::start_token_cleanup_scheduler(db.clone()).await;
    log::info!("✅ Background jobs started");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000") // Public site + portals (Next dev)
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(session_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // ==================== PUBLIC SITE DATA ====================
            .route(
                "/api/contact-submissions",
                web::post().to(api::submissions::create_submission),
            )
            .route("/api/v1/events", web::get().to(api::events::list_public_events))
            .route("/api/v1/mentors", web::get().to(api::mentors::list_public_mentors))
            .route("/api/v1/startups", web::get().to(api::startups::list_startups))
            // Token-gated mentor actions (no login)
            .service(
                web::scope("/api/mentor-actions")
                    .route("/verify", web::get().to(api::mentor_actions::verify_action_token))
                    .route("/act", web::post().to(api::mentor_actions::act_on_token)),
            )
            // Cron cleanup (shared-secret bearer, not JWT)
            .route(
                "/api/cleanup-tokens",
                web::post().to(api::mentor_actions::cleanup_tokens),
            )
            // ==================== AUTH ====================
            .service(
                web::scope("/api/v1/auth")
                    .route("/login", web::post().to(api::auth::login))
                    .route("/register", web::post().to(api::auth::register))
                    .route("/refresh", web::post().to(api::auth::refresh_token))
                    .route("/verify", web::get().to(api::auth::verify_token))
                    .route("/session", web::get().to(api::auth::get_session))
                    .service(
                        web::resource("/session/refresh")
                            .wrap(middleware::auth::AuthMiddleware::any())
                            .route(web::post().to(api::auth::refresh_session)),
                    )
                    .service(
                        web::resource("/logout")
                            .wrap(middleware::auth::AuthMiddleware::any())
                            .route(web::post().to(api::auth::logout)),
                    )
                    .service(
                        web::resource("/me")
                            .wrap(middleware::auth::AuthMiddleware::any())
                            .route(web::get().to(api::auth::get_me)),
                    ),
            )
            // ==================== USER PORTAL ====================
            .service(
                web::scope("/api/v1/requests")
                    .wrap(middleware::auth::AuthMiddleware::any())
                    .service(api::requests::create_request)
                    .service(api::requests::list_own_requests),
            )
            .service(
                web::scope("/api/v1/notifications")
                    .wrap(middleware::auth::AuthMiddleware::any())
                    .service(api::notifications::unread_count)
                    .service(api::notifications::mark_all_read)
                    .service(api::notifications::mark_read)
                    .service(api::notifications::list_notifications),
            )
            // ==================== MENTOR PORTAL ====================
            .service(
                web::scope("/api/v1/mentor/requests")
                    .wrap(middleware::auth::AuthMiddleware::role("mentor"))
                    .service(api::requests::list_mentor_inbox)
                    .service(api::requests::mentor_approve)
                    .service(api::requests::mentor_reject),
            )
            .service(
                web::resource("/api/v1/mentor/profile")
                    .wrap(middleware::auth::AuthMiddleware::role("mentor"))
                    .route(web::get().to(api::mentors::get_own_profile)),
            )
            // ==================== ADMIN CONSOLE ====================
            .service(
                web::scope("/api/v1/admin/submissions")
                    .wrap(middleware::auth::AuthMiddleware::role("admin"))
                    .service(api::submissions::accept_submission)
                    .service(api::submissions::reject_submission)
                    .service(api::submissions::get_submission)
                    .service(api::submissions::list_submissions),
            )
            .service(
                web::scope("/api/v1/admin/events")
                    .wrap(middleware::auth::AuthMiddleware::role("admin"))
                    .service(api::events::create_event)
                    .service(api::events::approve_event)
                    .service(api::events::reject_event)
                    .service(api::events::update_event)
                    .service(api::events::delete_event)
                    .service(api::events::list_all_events),
            )
            .service(
                web::scope("/api/v1/admin/mentors")
                    .wrap(middleware::auth::AuthMiddleware::role("admin"))
                    .service(api::mentors::create_mentor)
                    .service(api::mentors::update_mentor)
                    .service(api::mentors::delete_mentor)
                    .service(api::mentors::get_mentor)
                    .service(api::mentors::list_all_mentors),
            )
            .service(
                web::scope("/api/v1/admin/requests")
                    .wrap(middleware::auth::AuthMiddleware::role("admin"))
                    .service(api::requests::admin_approve)
                    .service(api::requests::admin_reject)
                    .service(api::requests::list_all_requests),
            )
            .service(
                web::scope("/api/v1/admin/startups")
                    .wrap(middleware::auth::AuthMiddleware::role("admin"))
                    .service(api::startups::create_startup)
                    .service(api::startups::update_startup)
                    .service(api::startups::delete_startup),
            )
            .service(
                web::scope("/api/admin")
                    .wrap(middleware::auth::AuthMiddleware::role("admin"))
                    .route(
                        "/delete-auth-user",
                        web::delete().to(api::admin::delete_auth_user),
                    )
                    .route(
                        "/migrate-mentors",
                        web::post().to(api::admin::migrate_mentors),
                    )
                    .route(
                        "/import-submissions",
                        web::post().to(api::admin::import_submissions),
                    ),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await;

    // Timers must not outlive the server
    session_manager.stop();

    server
}
