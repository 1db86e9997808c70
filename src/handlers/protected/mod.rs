// handlers/protected/mod.rs - handlers acting on behalf of the caller
//
// Route Prefix: /api/products, /api/menu, /api/consumption, /api/profile, /api/reports
// Middleware: caller context; identity reaches the database as transaction-local settings

pub mod consumption;
pub mod menu;
pub mod products;
pub mod profile;
pub mod reports;
