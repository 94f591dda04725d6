pub mod app;
pub mod images;
pub mod label;
pub mod theme;
pub mod wheel_view;
