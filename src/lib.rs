pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::db::establish_connection_pool;
    use crate::domain::filter::PageDefaults;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::{configure, json_config};

    fn cors(allowed_origins: &[String]) -> Cors {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allow_any_header()
            .max_age(3600)
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let timeout = Duration::from_secs(server_config.storage_timeout_secs);

        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url, timeout).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);
        let defaults = PageDefaults {
            page: 1,
            page_size: server_config.default_page_size,
        };

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(cors(&server_config.allowed_origins))
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .app_data(json_config(server_config.max_body_bytes))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(defaults))
                .app_data(web::Data::new(server_config.clone()))
                .configure(configure)
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
