//! Gateway Command Wrappers
//!
//! Frontend entry points into the todo gateway and the wallet session,
//! organized by domain. Every command returns `Result<_, String>` with a
//! message ready to show to the user.

mod todo;
mod wallet;

pub use todo::*;
pub use wallet::*;
