#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Spin(f64),
    Stop,
    ConfigReload,
}
