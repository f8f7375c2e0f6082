//! Debug console and C-library runtime binding.
//!
//! The runtime binding redirects the C library's standard I/O onto the debug
//! console. Which library is linked is a toolchain fact, so the choice is a
//! build-time [`RuntimeLibrary`] value rather than a branch at run time.

/// C runtime library flavours a board can be linked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RuntimeLibrary {
    /// newlib (GNU toolchain)
    Newlib,
    /// Arm standard C library (ArmCC)
    ArmLib,
    /// Arm MicroLib (ArmCC with `--library_type=microlib`)
    MicroLib,
}

/// Toolchain a board image is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Toolchain {
    /// GCC / binutils
    Gnu,
    /// Arm Compiler
    ArmCc {
        /// Link against MicroLib instead of the full Arm library
        microlib: bool,
    },
}

impl RuntimeLibrary {
    /// The library a toolchain links by default.
    pub const fn for_toolchain(toolchain: Toolchain) -> Self {
        match toolchain {
            Toolchain::Gnu => Self::Newlib,
            Toolchain::ArmCc { microlib: true } => Self::MicroLib,
            Toolchain::ArmCc { microlib: false } => Self::ArmLib,
        }
    }

    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Newlib => "newlib",
            Self::ArmLib => "armlib",
            Self::MicroLib => "microlib",
        }
    }
}

/// Debug console (usually a UART).
pub trait DebugConsole {
    /// Opaque console handle.
    type Console: Copy;

    /// Bring the console up.
    ///
    /// `None` means the console is unavailable; later steps treat that the
    /// same as a board built without debug output.
    fn init_debug_console(&mut self) -> Option<Self::Console>;
}

/// C-library binding layer.
pub trait RuntimeBinding: DebugConsole {
    /// Initialise `library`'s retargeting hooks.
    ///
    /// With `console == None` standard I/O stays unredirected.
    fn init_runtime_binding(&mut self, library: RuntimeLibrary, console: Option<Self::Console>);
}
