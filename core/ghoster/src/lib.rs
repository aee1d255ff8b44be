pub mod appearance;
pub mod ghost;
pub mod import;
pub mod scene;
pub mod session;
mod settings;

pub use ghoster_traits::*;
pub use settings::*;
