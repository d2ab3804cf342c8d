pub mod catchers;
pub mod presets;
pub mod search;

pub use catchers::*;
pub use presets::*;
pub use search::*;
