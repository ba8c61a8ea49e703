//! Operating system detection and per-platform defaults.

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// Microsoft Windows.
    Windows,
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS (for testing).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Returns `true` on Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Environment variable holding the user's home directory.
    #[must_use]
    pub fn home_var(&self) -> &'static str {
        if self.is_windows() { "USERPROFILE" } else { "HOME" }
    }

    /// Name of the Python launcher to look up on `PATH` when none is given.
    #[must_use]
    pub fn default_python(&self) -> &'static str {
        if self.is_windows() { "python" } else { "python3" }
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            // Default to Linux for other Unix-like systems
            Os::Linux
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_returns_valid() {
        let p = Platform::detect();
        assert_eq!(p.is_windows(), cfg!(target_os = "windows"));
    }

    #[test]
    fn platform_new_linux() {
        let p = Platform::new(Os::Linux);
        assert!(!p.is_windows());
        assert_eq!(p.home_var(), "HOME");
        assert_eq!(p.default_python(), "python3");
    }

    #[test]
    fn platform_new_windows() {
        let p = Platform::new(Os::Windows);
        assert!(p.is_windows());
        assert_eq!(p.home_var(), "USERPROFILE");
        assert_eq!(p.default_python(), "python");
    }
}
