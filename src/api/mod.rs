pub mod handlers;
pub mod hostaway_client;
pub mod models;
pub mod routes;

pub use hostaway_client::HostawayClient;
