//! View API DTOs

use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Debug, Default, Validate)]
pub struct DensityQuery {
    /// Max owners listed per node.
    #[validate(range(min = 1, max = 500))]
    pub top: Option<usize>,
}
