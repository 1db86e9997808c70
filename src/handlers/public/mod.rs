// handlers/public/mod.rs - handlers that need no caller identity
//
// Route Prefix: /api/auth/*
// Middleware: caller context only (logout forwards it, register/login ignore it)

pub mod auth;
