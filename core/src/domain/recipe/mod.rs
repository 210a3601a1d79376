pub mod entities;
pub mod errors;
pub mod fallback;
pub mod ports;
pub mod prompt;
pub mod schema;
pub mod services;
pub mod validator;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
