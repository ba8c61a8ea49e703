//! Command: print version information.

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("ENVSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the envsetup version to stdout.
pub fn run() {
    println!("envsetup {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
