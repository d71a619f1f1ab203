pub mod claude;
pub mod validate;
