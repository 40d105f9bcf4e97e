//! Payment types and the ports the bridge talks through.

pub mod initiate;
pub mod notification;
pub mod outcome;
pub mod params;
pub mod ports;
pub mod session;
