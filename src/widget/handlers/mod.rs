//! Built-in widget implementations

pub mod banner;
pub mod blank;
pub mod disks;
pub mod load;
pub mod print;
pub mod systemd;
pub mod uptime;

use std::sync::Arc;

use super::Widget;

/// Every built-in widget, in registration order
pub fn builtin() -> Vec<Arc<dyn Widget>> {
    vec![
        Arc::new(banner::Banner),
        Arc::new(blank::Blank),
        Arc::new(disks::Disks),
        Arc::new(load::Load),
        Arc::new(print::Print),
        Arc::new(systemd::SystemdServices),
        Arc::new(uptime::Uptime),
    ]
}
