pub mod client;
pub mod fetcher;
pub mod persistence;
pub mod util;
