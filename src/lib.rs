#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::auth::{login, register};
#[cfg(feature = "server")]
use crate::routes::company::{
    create_company, create_company_collection, delete_company, get_company,
    get_company_collection, list_companies, patch_company, update_company,
};
#[cfg(feature = "server")]
use crate::routes::employee::{
    create_employee, delete_employee, get_employee, list_employees, patch_employee,
    update_employee,
};

#[cfg(feature = "server")]
pub mod auth;
pub mod db;
pub mod domain;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
pub mod shaping;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/v1")
                    .service(register)
                    .service(login)
                    // The collection routes must be registered before the
                    // `{id}` routes so `collection` is not taken for an id.
                    .service(get_company_collection)
                    .service(create_company_collection)
                    .service(list_companies)
                    .service(get_company)
                    .service(create_company)
                    .service(update_company)
                    .service(patch_company)
                    .service(delete_company)
                    .service(list_employees)
                    .service(get_employee)
                    .service(create_employee)
                    .service(update_employee)
                    .service(patch_employee)
                    .service(delete_employee),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
