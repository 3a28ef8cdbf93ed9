pub mod input;
pub mod mask;
