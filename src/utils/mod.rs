//! Small string helpers shared across modules.

pub mod html;
pub mod plural;
pub mod route;
