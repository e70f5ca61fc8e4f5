mod approve;
mod compare;
mod init;
mod review;
mod test;

pub use self::approve::{ApproveSelection, approve};
pub use self::compare::compare;
pub use self::init::init;
pub use self::review::review;
pub use self::test::test;
