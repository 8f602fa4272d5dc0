//! Network reachability.
//!
//! The search session asks a [`Connectivity`] implementation before every
//! request so an offline device fails fast without touching the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reports whether the network is currently reachable.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Always reports online. For hosts without a reachability signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// A shared online/offline flag set by the host's reachability monitor.
///
/// Clones share the same flag.
#[derive(Debug, Clone)]
pub struct ConnectivityFlag(Arc<AtomicBool>);

impl ConnectivityFlag {
    pub fn new(online: bool) -> Self {
        Self(Arc::new(AtomicBool::new(online)))
    }

    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::Release);
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
