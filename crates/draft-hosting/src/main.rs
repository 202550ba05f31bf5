mod catalog;
mod custom_list;
mod gateway;
mod server;
mod state;
mod themes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    draft_core::init_logging();
    server::Server::run().await
}
