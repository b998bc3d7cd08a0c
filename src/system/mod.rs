pub mod collector;
pub mod process;
