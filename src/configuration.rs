use std::time::Duration;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn host(&self) -> String;
    fn port(&self) -> u16;
    fn database_url(&self) -> Option<String>;
    /// Pause between failed attempts to reach the database.
    fn connect_retry(&self) -> Duration;
}
