//! Patient-portal emergency flow: classify a spoken description, package
//! it as an `EmergencyRecord`, and hand it to the voice agent or dispatch.

pub mod classify;
pub mod geolocation;
pub mod record;
pub mod speech;
pub mod voice;

pub use classify::*;
pub use geolocation::*;
pub use record::*;
pub use speech::*;
pub use voice::*;
