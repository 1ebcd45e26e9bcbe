extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate hex;
extern crate jsonwebtoken;
extern crate log;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate sha2;
extern crate sqlx;
extern crate thiserror;

mod config;
mod context;
mod error;
mod handlers;
mod middlewares;
pub mod models;
pub mod quota;
pub mod request;
pub mod response;

use actix_web::web::{delete, get, post, resource, scope, Data};
use actix_web::HttpServer;
use middlewares::jwt::{Jwt, JWT_SECRET};
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    std::env::set_var("RUST_LOG", "actix_web=info,playgrounds=info");
    env_logger::init();
    let database_url = dotenv::var("DATABASE_URL").expect("environment variable DATABASE_URL not been set");
    let secret = dotenv::var(JWT_SECRET).expect("environment variable JWT_SECRET not been set");
    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_owned());
    let config = config::Config::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .service(
                scope("")
                    .service(resource("signup").route(post().to(handlers::signup)))
                    .service(resource("login").route(post().to(handlers::login)))
                    .service(resource("logout").route(post().to(handlers::logout)))
                    .service(
                        scope("votes")
                            .wrap(Jwt::new(secret.as_bytes().to_owned()))
                            .route("", post().to(handlers::vote::cast))
                            .route("quota", get().to(handlers::quota::status))
                            .route("history", get().to(handlers::vote::history))
                            .route("history", delete().to(handlers::vote::retract)),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
