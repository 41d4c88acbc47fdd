pub mod applications;
pub mod defaults;
pub mod jobs;
pub mod misc;
pub mod reports;
pub mod roles;
pub mod users;

pub use self::applications::*;
pub use self::jobs::*;
pub use self::misc::*;
pub use self::roles::*;
pub use self::users::*;
