//! MySQL driver for sqlfleet

mod connection;
mod factory;
mod params;

pub use connection::MySqlConnection;
pub use factory::MySqlConnectionFactory;
pub use params::{interpolate, value_to_mysql_literal};
