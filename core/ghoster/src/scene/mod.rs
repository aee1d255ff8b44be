mod memory;

pub use ghoster_traits::scene::*;
pub use memory::*;
