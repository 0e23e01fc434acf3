pub mod after_joining;
pub mod after_leaving;
pub mod calls;
pub mod employees;
pub mod indent;
pub mod joining;
pub mod leaving;
pub mod policy;
pub mod setup;
