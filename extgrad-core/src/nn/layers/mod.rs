pub mod activation;
pub mod linear;
pub mod user_activation;

pub use activation::Sigmoid;
pub use linear::Linear;
pub use user_activation::UserActivation;
