pub mod artist;
pub mod groups;
pub mod painting;

pub use artist::*;
pub use groups::*;
pub use painting::*;
