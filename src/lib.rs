//! ktbuild - Kotlin compilation steps for embedding in a build host
//!
//! Re-exports the core API and adds process-wide logging setup.
pub use ktbuild_core::*;

pub mod logging {
    /// Install a `tracing` subscriber filtered by `RUST_LOG`.
    ///
    /// Hosts that already installed their own subscriber keep it; calling this
    /// more than once is harmless.
    pub fn init() {
        if let Err(e) = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
        {
            // reaches the subscriber that was already installed
            tracing::debug!("Keeping existing tracing subscriber: {}", e);
        }
    }

    #[cfg(test)]
    mod tests {
        #[test]
        fn test_init_twice_keeps_first_subscriber() {
            super::init();
            super::init();
            tracing::info!("still logging after a second init");
        }
    }
}
