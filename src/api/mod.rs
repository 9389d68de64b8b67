pub mod controller;
pub mod dto;
pub mod routes;
pub mod util;
