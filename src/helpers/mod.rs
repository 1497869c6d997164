pub mod ip;
pub mod value;
