mod attr;
mod host;

pub use attr::*;
pub use host::*;
