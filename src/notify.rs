use tracing::{error, info};

/// User-facing success/failure messages.
///
/// Delivery (toasts, banners, a terminal line) belongs to the implementor.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        error!("❌ {}", message);
    }
}
