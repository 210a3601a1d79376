pub mod ports;
pub mod services;
pub mod signature;
pub mod value_objects;

pub use ports::*;
pub use value_objects::*;
