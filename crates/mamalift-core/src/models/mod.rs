pub mod appointment;
pub mod classification;
pub mod crisis;
pub mod demographics;
pub mod insurance;
pub mod response;
pub mod summary;
