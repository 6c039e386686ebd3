pub mod mean;
pub mod sum;
mod utils;

pub use mean::mean_op;
pub use sum::sum_op;
