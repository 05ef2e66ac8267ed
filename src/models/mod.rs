pub mod conditions;
pub mod emergency;
pub mod enums;
pub mod location;
pub mod prediction;
pub mod risk;

pub use conditions::*;
pub use emergency::*;
pub use enums::*;
pub use location::*;
pub use prediction::*;
pub use risk::*;
