pub mod element;
pub mod limit;
pub mod result;
