use crate::db::{init_db, Database};
use crate::mls::MlsConfig;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod db;
mod domain;
mod errors;
mod mls;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() {
    let db = Database::new("listings.sqlite3");

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    // Read MLS credentials once; everything downstream gets the value
    // object, never the environment.
    let mls_config = MlsConfig::from_env();
    if !mls_config.is_configured() {
        eprintln!("⚠️ MLS credentials not configured; sync endpoints will return 503");
    }

    let addr: SocketAddr = "127.0.0.1:8000".parse().unwrap();
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &db, &mls_config) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
