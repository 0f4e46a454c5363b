pub mod chart;
pub mod event;
pub mod session;

pub use chart::*;
pub use event::*;
pub use session::*;
