//! Platform identification from OS-release metadata.
//!
//! Detection is deliberately substring based: the normalized OS-release blob
//! (newlines folded to spaces, double quotes dropped) is tested for a fixed,
//! ordered list of markers and the first hit wins.
//!
//! # Example
//!
//! ```
//! use distkit::platform::{self, Family, OsRelease};
//!
//! let os = OsRelease::parse("NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\n");
//! let tag = platform::identify(&os, "Linux-6.5.0-x86_64").unwrap();
//! assert_eq!(tag.family, Family::Ubuntu);
//! assert_eq!(tag.label, "Linux-6.5.0-x86_64-Ubuntu-22");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Default location of the OS-release file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Content used when the OS-release file does not exist.
pub const MISSING_OS_RELEASE: &str = "NOT Supported";

/// Parsed OS-release metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsRelease {
    normalized: String,
    fields: BTreeMap<String, String>,
}

impl OsRelease {
    /// Parse raw OS-release text.
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace('\n', " ").replace('"', "");

        let fields = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|l| l.split_once('='))
            .map(|(k, v)| {
                let v = v.trim().trim_matches('"').trim_matches('\'');
                (k.trim().to_string(), v.to_string())
            })
            .collect();

        Self { normalized, fields }
    }

    /// Load OS-release metadata from `path`.
    ///
    /// A missing file yields [`MISSING_OS_RELEASE`] content, which no
    /// family marker matches.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found", path.display());
                Ok(Self::parse(MISSING_OS_RELEASE))
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Whether the normalized blob contains `marker`.
    pub fn contains(&self, marker: &str) -> bool {
        self.normalized.contains(marker)
    }

    /// Value of a `KEY=value` field, quotes stripped.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Normalized blob used for marker matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// A class of distributions sharing a package-manager dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Red Hat Enterprise Linux, CentOS and rebuilds (yum).
    RedHat,
    /// Ubuntu (apt-get).
    Ubuntu,
    /// SUSE Linux Enterprise Server (zypper).
    Sles,
    /// CBL-Mariner (tdnf).
    Mariner,
}

impl Family {
    /// Whether packages use RPM naming.
    pub fn is_rpm(&self) -> bool {
        !matches!(self, Family::Ubuntu)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Family::RedHat => "RedHat",
            Family::Ubuntu => "Ubuntu",
            Family::Sles => "SLES",
            Family::Mariner => "Mariner",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Version refinement of a detected family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistroVersion {
    /// Recognized major version.
    Major(u32),
    /// Family matched but the version is not one we know.
    Undefined,
    /// Family is not refined by version.
    Unversioned,
}

/// Normalized platform identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTag {
    /// Distribution family.
    pub family: Family,
    /// Major version, if refined.
    pub version: DistroVersion,
    /// Host label with the family suffix appended.
    pub label: String,
}

impl PlatformTag {
    /// Build a tag, deriving the label from `host_label`.
    pub fn new(family: Family, version: DistroVersion, host_label: &str) -> Self {
        let label = format!("{host_label}-{}", suffix(family, version));
        Self {
            family,
            version,
            label,
        }
    }

    /// Major version when recognized.
    pub fn major(&self) -> Option<u32> {
        match self.version {
            DistroVersion::Major(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is `family` at major version `version`.
    pub fn is(&self, family: Family, version: u32) -> bool {
        self.family == family && self.major() == Some(version)
    }

    /// Name of the CMake package on this platform.
    pub fn build_tool(&self) -> &'static str {
        if self.is(Family::RedHat, 7) {
            "cmake3"
        } else {
            "cmake"
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

fn suffix(family: Family, version: DistroVersion) -> String {
    match (family, version) {
        (Family::RedHat, DistroVersion::Major(v)) => format!("redhat-{v}"),
        (Family::RedHat, _) => "redhat-centos-undefined-version".to_string(),
        (Family::Ubuntu, DistroVersion::Major(v)) => format!("Ubuntu-{v}"),
        (Family::Ubuntu, _) => "Ubuntu-undefined-version".to_string(),
        (Family::Sles, _) => "SLES".to_string(),
        (Family::Mariner, _) => "Mariner".to_string(),
    }
}

/// Pick the first `VERSION_ID=<v>` marker present.
fn match_version(os: &OsRelease, candidates: &[u32]) -> DistroVersion {
    candidates
        .iter()
        .copied()
        .find(|v| os.contains(&format!("VERSION_ID={v}")))
        .map_or(DistroVersion::Undefined, DistroVersion::Major)
}

/// Identify the platform from OS-release metadata.
///
/// Markers are tested in priority order: `centos`/`redhat`, `Ubuntu`,
/// `SLES`, `Mariner`. `host_label` only feeds the label.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPlatform`] when no marker matches.
pub fn identify(os: &OsRelease, host_label: &str) -> Result<PlatformTag> {
    let (family, version) = if os.contains("centos") || os.contains("redhat") {
        (Family::RedHat, match_version(os, &[7, 8, 9]))
    } else if os.contains("Ubuntu") {
        (Family::Ubuntu, match_version(os, &[20, 22, 24]))
    } else if os.contains("SLES") {
        (Family::Sles, DistroVersion::Unversioned)
    } else if os.contains("Mariner") {
        (Family::Mariner, DistroVersion::Unversioned)
    } else {
        return Err(Error::UnsupportedPlatform {
            label: host_label.to_string(),
        });
    };

    let tag = PlatformTag::new(family, version, host_label);
    if tag.version == DistroVersion::Undefined {
        log::warn!("{family} detected with an unrecognized version");
    }
    Ok(tag)
}

/// Generic host description: OS name, kernel release and architecture.
pub fn host_label() -> String {
    let kernel = fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let os = match std::env::consts::OS {
        "linux" => "Linux",
        other => other,
    };
    format!("{os}-{kernel}-{}", std::env::consts::ARCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "Linux-6.5.0-x86_64";

    const UBUNTU_22: &str = r#"PRETTY_NAME="Ubuntu 22.04.4 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.4 LTS (Jammy Jellyfish)"
ID=ubuntu
ID_LIKE=debian
HOME_URL="https://www.ubuntu.com/"
"#;

    const RHEL_9: &str = r#"NAME="Red Hat Enterprise Linux"
VERSION="9.3 (Plow)"
ID="rhel"
ID_LIKE="fedora"
VERSION_ID="9.3"
HOME_URL="https://www.redhat.com/"
"#;

    const CENTOS_7: &str = r#"NAME="CentOS Linux"
VERSION="7 (Core)"
ID="centos"
ID_LIKE="rhel fedora"
VERSION_ID="7"
"#;

    const SLES_15: &str = r#"NAME="SLES"
VERSION="15-SP5"
VERSION_ID="15.5"
ID="sles"
ID_LIKE="suse"
"#;

    const MARINER: &str = r#"NAME="Common Base Linux Mariner"
VERSION="2.0.20240123"
ID=mariner
VERSION_ID="2.0"
"#;

    fn tag(text: &str) -> Result<PlatformTag> {
        identify(&OsRelease::parse(text), HOST)
    }

    #[test]
    fn test_parse_fields() {
        let os = OsRelease::parse(UBUNTU_22);
        assert_eq!(os.get("NAME"), Some("Ubuntu"));
        assert_eq!(os.get("VERSION_ID"), Some("22.04"));
        assert_eq!(os.get("ID"), Some("ubuntu"));
        assert_eq!(os.get("MISSING"), None);
    }

    #[test]
    fn test_normalized_blob() {
        let os = OsRelease::parse("NAME=\"Ubuntu\"\nVERSION_ID=\"20.04\"\n");
        assert_eq!(os.normalized(), "NAME=Ubuntu VERSION_ID=20.04 ");
        assert!(os.contains("VERSION_ID=20"));
    }

    #[test]
    fn test_identify_ubuntu_22() {
        let t = tag(UBUNTU_22).unwrap();
        assert_eq!(t.family, Family::Ubuntu);
        assert_eq!(t.version, DistroVersion::Major(22));
        assert_eq!(t.label, "Linux-6.5.0-x86_64-Ubuntu-22");
    }

    #[test]
    fn test_identify_ubuntu_versions() {
        for v in [20, 22, 24] {
            let text = format!("NAME=\"Ubuntu\"\nVERSION_ID=\"{v}.04\"\n");
            assert!(tag(&text).unwrap().is(Family::Ubuntu, v));
        }
    }

    #[test]
    fn test_identify_ubuntu_undefined_version() {
        let t = tag("NAME=\"Ubuntu\"\nVERSION_ID=\"23.10\"\n").unwrap();
        assert_eq!(t.family, Family::Ubuntu);
        assert_eq!(t.version, DistroVersion::Undefined);
        assert_eq!(t.label, "Linux-6.5.0-x86_64-Ubuntu-undefined-version");
    }

    #[test]
    fn test_identify_redhat_9() {
        let t = tag(RHEL_9).unwrap();
        assert!(t.is(Family::RedHat, 9));
        assert_eq!(t.label, "Linux-6.5.0-x86_64-redhat-9");
        assert_eq!(t.build_tool(), "cmake");
    }

    #[test]
    fn test_identify_centos_7_uses_cmake3() {
        let t = tag(CENTOS_7).unwrap();
        assert!(t.is(Family::RedHat, 7));
        assert_eq!(t.build_tool(), "cmake3");
    }

    #[test]
    fn test_identify_rocky_matches_centos_marker() {
        let t = tag("NAME=\"Rocky Linux\"\nID_LIKE=\"rhel centos fedora\"\nVERSION_ID=\"8.9\"\n")
            .unwrap();
        assert!(t.is(Family::RedHat, 8));
    }

    #[test]
    fn test_identify_redhat_undefined_version() {
        let t = tag("NAME=\"Red Hat\"\nHOME_URL=\"https://www.redhat.com/\"\nVERSION_ID=\"10.0\"\n")
            .unwrap();
        assert_eq!(t.family, Family::RedHat);
        assert_eq!(t.version, DistroVersion::Undefined);
        assert_eq!(t.label, "Linux-6.5.0-x86_64-redhat-centos-undefined-version");
    }

    #[test]
    fn test_identify_sles_and_mariner() {
        let sles = tag(SLES_15).unwrap();
        assert_eq!(sles.family, Family::Sles);
        assert_eq!(sles.version, DistroVersion::Unversioned);
        assert_eq!(sles.label, "Linux-6.5.0-x86_64-SLES");

        let mariner = tag(MARINER).unwrap();
        assert_eq!(mariner.family, Family::Mariner);
        assert_eq!(mariner.label, "Linux-6.5.0-x86_64-Mariner");
    }

    #[test]
    fn test_redhat_marker_wins_over_ubuntu() {
        let t = tag("NAME=Ubuntu centos VERSION_ID=22").unwrap();
        assert_eq!(t.family, Family::RedHat);
    }

    #[test]
    fn test_identify_unsupported() {
        let debian = "NAME=\"Debian GNU/Linux\"\nID=debian\nVERSION_ID=\"12\"\n";
        assert!(matches!(
            tag(debian),
            Err(Error::UnsupportedPlatform { label }) if label == HOST
        ));
        assert!(tag(MISSING_OS_RELEASE).is_err());
        assert!(tag("").is_err());
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(tag("NAME=ubuntu").is_err());
        assert!(tag("NAME=sles").is_err());
    }

    #[test]
    fn test_load_missing_file_yields_sentinel() {
        let tmp = tempfile::TempDir::new().unwrap();
        let os = OsRelease::load(&tmp.path().join("os-release")).unwrap();
        assert_eq!(os.normalized(), MISSING_OS_RELEASE);
    }

    #[test]
    fn test_load_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("os-release");
        fs::write(&path, SLES_15).unwrap();
        let os = OsRelease::load(&path).unwrap();
        assert_eq!(os.get("ID"), Some("sles"));
    }

    #[test]
    fn test_host_label_shape() {
        let label = host_label();
        assert!(label.ends_with(std::env::consts::ARCH));
    }
}
