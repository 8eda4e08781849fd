use std::fmt;

/// Detected operating system platform.
///
/// Resolved once at startup and passed into step actions, so each action
/// pattern-matches instead of re-probing the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOs,
    DebianLike,
    OtherLinux,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::MacOs => write!(f, "macos"),
            Os::DebianLike => write!(f, "debian-like"),
            Os::OtherLinux => write!(f, "linux"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    ///
    /// On Linux, Debian derivatives are fingerprinted from `/etc/os-release`;
    /// an unreadable or unrecognised file conservatively reads as
    /// [`Os::OtherLinux`].
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS (for tests and the doctor
    /// command's what-if output).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    #[must_use]
    pub fn is_debian_like(&self) -> bool {
        self.os == Os::DebianLike
    }

    #[must_use]
    pub fn is_linux(&self) -> bool {
        matches!(self.os, Os::DebianLike | Os::OtherLinux)
    }

    /// Whether a supported package manager is available on this platform.
    #[must_use]
    pub fn has_package_manager(&self) -> bool {
        matches!(self.os, Os::MacOs | Os::DebianLike)
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "linux") {
            std::fs::read_to_string("/etc/os-release")
                .map_or(Os::OtherLinux, |contents| Self::parse_os_release(&contents))
        } else {
            // Treat other Unix-like systems as unsupported Linux
            Os::OtherLinux
        }
    }

    /// Classify an `/etc/os-release` document.
    ///
    /// A distribution counts as Debian-like when its `ID` is `debian` or
    /// `ubuntu`, or when `debian` appears in `ID_LIKE`.
    fn parse_os_release(contents: &str) -> Os {
        let mut id = "";
        let mut id_like = "";
        for line in contents.lines() {
            if let Some(value) = line.strip_prefix("ID=") {
                id = value.trim_matches('"');
            } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
                id_like = value.trim_matches('"');
            }
        }

        if id == "debian" || id == "ubuntu" || id_like.split_whitespace().any(|w| w == "debian") {
            Os::DebianLike
        } else {
            Os::OtherLinux
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_returns_valid() {
        let p = Platform::detect();
        // On any system this should resolve to one of the closed variants
        assert!(p.is_macos() || p.is_linux());
    }

    #[test]
    fn platform_new_macos() {
        let p = Platform::new(Os::MacOs);
        assert!(p.is_macos());
        assert!(!p.is_linux());
        assert!(p.has_package_manager());
    }

    #[test]
    fn platform_new_debian() {
        let p = Platform::new(Os::DebianLike);
        assert!(p.is_debian_like());
        assert!(p.is_linux());
        assert!(p.has_package_manager());
    }

    #[test]
    fn platform_new_other_linux() {
        let p = Platform::new(Os::OtherLinux);
        assert!(p.is_linux());
        assert!(!p.is_debian_like());
        assert!(!p.has_package_manager());
    }

    #[test]
    fn parse_os_release_debian() {
        let contents = "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nID=debian\n";
        assert_eq!(Platform::parse_os_release(contents), Os::DebianLike);
    }

    #[test]
    fn parse_os_release_ubuntu() {
        let contents = "NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n";
        assert_eq!(Platform::parse_os_release(contents), Os::DebianLike);
    }

    #[test]
    fn parse_os_release_id_like_debian() {
        let contents = "ID=raspbian\nID_LIKE=\"debian\"\n";
        assert_eq!(Platform::parse_os_release(contents), Os::DebianLike);
    }

    #[test]
    fn parse_os_release_arch_is_other() {
        let contents = "NAME=\"Arch Linux\"\nID=arch\nID_LIKE=archlinux\n";
        assert_eq!(Platform::parse_os_release(contents), Os::OtherLinux);
    }

    #[test]
    fn parse_os_release_garbage_is_other() {
        assert_eq!(Platform::parse_os_release("not an os-release"), Os::OtherLinux);
        assert_eq!(Platform::parse_os_release(""), Os::OtherLinux);
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(Os::DebianLike.to_string(), "debian-like");
        assert_eq!(Os::OtherLinux.to_string(), "linux");
    }
}
