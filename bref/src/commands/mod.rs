pub mod deploy;
pub mod invoke;
