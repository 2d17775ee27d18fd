pub mod combinators;
pub mod error;
pub mod fractal;
pub mod grid;
pub mod interp;
pub mod ops;
pub mod plugin;
pub mod primitives;
pub mod resolver;
pub mod scene;
pub mod shapes;
pub mod types;
pub mod utils;

pub use combinators::FieldExt;
pub use plugin::SdfCollisionPlugin;
pub use resolver::{CollisionBody, Resolution, Resolver, ResolverConfig};
pub use types::Field;
