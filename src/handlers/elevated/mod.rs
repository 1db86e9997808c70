// handlers/elevated/mod.rs - administrator handlers
//
// Route Prefix: /api/users/*, /api/admin/*
// Middleware: caller context + require_admin (x-user-role must be app_admin)

pub mod users;
