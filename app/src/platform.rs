use shell::platform::NativeChrome;
use std::sync::atomic::{AtomicBool, Ordering};

/// Native chrome of a terminal host.
///
/// A terminal has no status bar to style; the splash is the banner printed
/// until startup hides it.
#[derive(Debug, Default)]
pub struct TerminalChrome {
    splash_hidden: AtomicBool,
}

impl TerminalChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn splash_hidden(&self) -> bool {
        self.splash_hidden.load(Ordering::SeqCst)
    }
}

impl NativeChrome for TerminalChrome {
    fn style_default_status_bar(&self) {
        log::debug!("Terminal status line keeps its default style");
    }

    fn hide_splash(&self) {
        if !self.splash_hidden.swap(true, Ordering::SeqCst) {
            log::debug!("Splash banner hidden");
        }
    }
}
