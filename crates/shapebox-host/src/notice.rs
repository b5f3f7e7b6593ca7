//! User-visible notices.
//!
//! The host has exactly three things to say to a user outside the simulation
//! itself: it is loading, the environment cannot run it, or something broke.
//! Notices surface through the log facade and the window title, and a halted
//! session keeps painting a solid backdrop so the window does not appear dead.

/// The three notice kinds, in order of appearance.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Notice {
    /// Transient: shown while the module is fetched and instantiated.
    Loading,
    /// Terminal, informational: the environment cannot execute the module.
    Unsupported,
    /// Terminal: an unrecoverable error; the user must restart.
    Fault,
}

impl Notice {
    /// Short label for window titles.
    pub fn title(self) -> &'static str {
        match self {
            Notice::Loading => "loading",
            Notice::Unsupported => "unsupported environment",
            Notice::Fault => "runtime fault",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::Loading => "Loading the simulation module...",
            Notice::Unsupported => {
                "This host cannot execute WebAssembly modules, \
                 which are needed to run this program."
            }
            Notice::Fault => {
                "Something broke inside the host runtime. \
                 Check the log output for details."
            }
        }
    }

    /// Backdrop painted while this notice is on display.
    pub fn backdrop(self) -> u32 {
        match self {
            Notice::Loading => 0x00101014,
            Notice::Unsupported => 0x00202830,
            Notice::Fault => 0x00401014,
        }
    }

    /// Emits the notice on the diagnostic channel at its severity.
    pub fn log(self) {
        match self {
            Notice::Loading => log::info!("{}", self.message()),
            Notice::Unsupported => log::warn!("{}", self.message()),
            Notice::Fault => log::error!("{}", self.message()),
        }
    }
}
