pub mod preprocessing;
pub mod extraction;
pub mod simplification;
pub mod classification;
pub mod annotation;

pub use preprocessing::*;
pub use extraction::*;
pub use simplification::*;
pub use classification::*;
pub use annotation::*;
