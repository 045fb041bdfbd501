pub mod engines;
pub mod health;
pub mod options;

pub use engines::list_engines;
pub use health::health_check;
pub use options::validate_options;
