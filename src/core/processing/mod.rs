pub mod composite;
pub mod index;
pub mod mask;
pub mod normalize;
pub mod pipeline;
pub mod save;
pub mod stretch;
