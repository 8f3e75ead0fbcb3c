pub mod histogram;
pub mod panels;
