pub mod menu;
pub mod routes;
