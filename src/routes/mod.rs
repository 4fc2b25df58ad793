mod health;
mod waitlist_proxy;

pub use health::*;
pub use waitlist_proxy::*;
