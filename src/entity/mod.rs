pub mod admin;
pub mod company;
pub mod location;
pub mod sensor;
pub mod sensor_data;
