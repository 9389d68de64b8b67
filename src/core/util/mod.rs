pub mod cost_util;
pub mod quantity;
