pub mod array;

pub use array::{FAILED, OK};
