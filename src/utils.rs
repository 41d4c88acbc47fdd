pub mod auth;
pub mod csv;

pub use self::auth::*;
pub use self::csv::*;
