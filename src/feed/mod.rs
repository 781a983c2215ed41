//! Campus feed: controller state, seed data and card rendering.

mod card;
mod controller;
mod seed;

pub use card::*;
pub use controller::*;
pub use seed::*;
