pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod store;
