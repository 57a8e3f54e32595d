use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};

use mentora_server::{
    app_state::AppState,
    config::Config,
    handlers::{ai_config_handler, quiz_handler},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(ai_config_handler::list_ai_configs)
            .service(ai_config_handler::get_active_ai_config)
            .service(ai_config_handler::create_ai_config)
            .service(ai_config_handler::update_ai_config)
            .service(ai_config_handler::activate_ai_config)
            .service(ai_config_handler::deactivate_ai_config)
            .service(ai_config_handler::delete_ai_config)
            .service(quiz_handler::generate_quiz)
            .service(quiz_handler::get_quiz)
            .service(quiz_handler::delete_quiz)
            .service(quiz_handler::submit_quiz)
            .service(quiz_handler::list_quiz_attempts)
            .service(quiz_handler::best_quiz_score)
            .service(quiz_handler::list_my_attempts)
            .route(
                "/health",
                web::get().to(|| async {
                    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
                }),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
