pub mod annotation;
pub mod capture;
