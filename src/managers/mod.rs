pub mod articles;
pub mod clock;
pub mod guide;
