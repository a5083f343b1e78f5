pub mod index;
pub mod not_found;

pub use index::{IndexPage, LimitPage, SendPage, SwapPage};
pub use not_found::NotFound;
