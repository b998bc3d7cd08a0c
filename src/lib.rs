pub mod action;
pub mod app;
pub mod bar;
pub mod config;
pub mod event;
pub mod format;
pub mod nav;
pub mod system;
pub mod ui;
