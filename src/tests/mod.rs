
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route tracing output through the test harness so `--nocapture` shows
/// the submit lifecycle.
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}
