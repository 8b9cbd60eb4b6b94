use actix::System;
use actix_web::{web, App, HttpResponse, HttpServer};
use cashflow::env::Settings;
use cashflow::server::{end_point, AppState};
use cashflow::setup_logger;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::new().expect("Failed to load settings");
    setup_logger(&settings.logging.directory);
    info!("Logger initialized");

    let app_state = web::Data::new(AppState::new(settings.clone()));

    let bind_address = format!("{}:{}", settings.server.bind_address, settings.server.port);
    info!("Starting HTTP server on {}", bind_address);

    let mut server = HttpServer::new(move || {
        let health_route = || async { HttpResponse::Ok().body("OK") };

        App::new()
            .app_data(app_state.clone())
            .service(end_point::create_room)
            .service(end_point::list_rooms)
            .service(end_point::game_ws_route)
            .route("/health", web::get().to(health_route))
    })
    .bind(&bind_address)?
    .run();

    info!("Game server is running on {}", bind_address);

    tokio::select! {
        res = &mut server => {
            error!("Server exited unexpectedly");
            return res;
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received. Initiating graceful shutdown...");
            System::current().stop();
        },
    }

    server.await?;
    info!("System has shut down gracefully");

    Ok(())
}
