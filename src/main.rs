mod models;
mod routes;
mod db;
mod error;
mod services;
use actix_web::{App, HttpServer, middleware::Logger, web};
use services::data_manager::SqliteDataManager;
use services::omdb::OmdbClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    println!("🔌 Connecting to database...");
    let db = db::establish_connection()
        .await
        .expect("Failed to connect to database");

    db::init_schema(&db)
        .await
        .expect("Failed to create database schema");
    println!("✅ Database connected!");

    // Client OMDb optionnel : sans clé API, les films sont créés sans enrichissement
    let lookup = OmdbClient::from_env();
    if lookup.is_none() {
        log::warn!("OMDB_API_KEY not set, movie metadata enrichment disabled");
    }

    let manager = web::Data::new(SqliteDataManager::new(db, lookup));

    println!("🚀 Starting server on http://127.0.0.1:8080");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(manager.clone())
            .configure(routes::configure_routes)
    })
        .bind(("127.0.0.1", 8080))?
        .run()
        .await
}
