//! Static dependency catalog: tier × family × version → install targets.
//!
//! Lists keep definition order. Later entries may rely on earlier ones, e.g.
//! repository RPMs must be installed before the packages they unlock.

use crate::error::{Error, Result};
use crate::platform::{Family, PlatformTag};
use crate::types::{InstallTarget, Tier};

const COMMON: &[&str] = &["cmake", "pkg-config", "rocm-hip-runtime"];

const CORE_DEBIAN: &[&str] = &["libva-amdgpu-dev", "rocm-hip-runtime-dev"];
const CORE_DEBIAN_U22: &[&str] = &["libstdc++-12-dev"];
const CORE_RPM: &[&str] = &["libva-amdgpu-devel", "rocm-hip-runtime-devel"];

const RUNTIME_DEBIAN: &[&str] = &[
    "libva2-amdgpu",
    "libva-amdgpu-drm2",
    "libva-amdgpu-wayland2",
    "libva-amdgpu-x11-2",
    "mesa-amdgpu-va-drivers",
    "vainfo",
];
const RUNTIME_RPM: &[&str] = &["libva-amdgpu", "mesa-amdgpu-va-drivers", "libva-utils"];

const FFMPEG_DEBIAN: &[&str] = &["libavcodec-dev", "libavformat-dev", "libavutil-dev"];

const EPEL_8: &str = "https://dl.fedoraproject.org/pub/epel/epel-release-latest-8.noarch.rpm";
const RPMFUSION_FREE_8: &str =
    "https://download1.rpmfusion.org/free/el/rpmfusion-free-release-8.noarch.rpm";
const RPMFUSION_NONFREE_8: &str =
    "https://download1.rpmfusion.org/nonfree/el/rpmfusion-nonfree-release-8.noarch.rpm";
const SDL2_EL8: &str =
    "http://mirror.centos.org/centos/8/PowerTools/x86_64/os/Packages/SDL2-2.0.10-2.el8.x86_64.rpm";

const EPEL_9: &str = "https://dl.fedoraproject.org/pub/epel/epel-release-latest-9.noarch.rpm";
const EPEL_NEXT_9: &str =
    "https://dl.fedoraproject.org/pub/epel/epel-next-release-latest-9.noarch.rpm";
// `$(rpm -E %rhel)` is left for the shell to evaluate.
const RPMFUSION_FREE_EL: &str =
    "https://mirrors.rpmfusion.org/free/el/rpmfusion-free-release-$(rpm -E %rhel).noarch.rpm";
const RPMFUSION_NONFREE_EL: &str =
    "https://mirrors.rpmfusion.org/nonfree/el/rpmfusion-nonfree-release-$(rpm -E %rhel).noarch.rpm";

// `$releasever` is expanded by zypper itself.
const PACKMAN_ESSENTIALS: &str =
    "https://ftp.gwdg.de/pub/linux/misc/packman/suse/openSUSE_Leap_$releasever/Essentials";

const FFMPEG_RPM: &[&str] = &["ffmpeg", "ffmpeg-devel"];

fn each(names: &[&str]) -> Vec<InstallTarget> {
    names.iter().map(|n| InstallTarget::package(*n)).collect()
}

/// Resolve a tier into its ordered install targets for `platform`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCombination`] for the developer tier on
/// platforms without a definition (Mariner, RedHat 7, RedHat with an
/// unrecognized version).
pub fn resolve(tier: Tier, platform: &PlatformTag) -> Result<Vec<InstallTarget>> {
    match tier {
        Tier::Common => Ok(each(COMMON)),
        Tier::Core => Ok(core(platform)),
        Tier::Runtime => Ok(runtime(platform)),
        Tier::Developer => developer(platform),
    }
}

fn core(platform: &PlatformTag) -> Vec<InstallTarget> {
    match platform.family {
        Family::Ubuntu => {
            let mut targets = each(CORE_DEBIAN);
            if platform.is(Family::Ubuntu, 22) {
                targets.extend(each(CORE_DEBIAN_U22));
            }
            targets
        }
        Family::RedHat | Family::Sles | Family::Mariner => each(CORE_RPM),
    }
}

fn runtime(platform: &PlatformTag) -> Vec<InstallTarget> {
    match platform.family {
        Family::Ubuntu => each(RUNTIME_DEBIAN),
        Family::RedHat | Family::Sles => each(RUNTIME_RPM),
        Family::Mariner => Vec::new(),
    }
}

fn developer(platform: &PlatformTag) -> Result<Vec<InstallTarget>> {
    let targets = match (platform.family, platform.major()) {
        (Family::Ubuntu, _) => each(FFMPEG_DEBIAN),
        (Family::RedHat, Some(8)) => vec![
            InstallTarget::package(EPEL_8),
            InstallTarget::packages([RPMFUSION_FREE_8, RPMFUSION_NONFREE_8]),
            InstallTarget::package(SDL2_EL8),
            InstallTarget::packages(FFMPEG_RPM.iter().copied()),
        ],
        (Family::RedHat, Some(9)) => vec![
            InstallTarget::package(EPEL_9),
            InstallTarget::package(EPEL_NEXT_9),
            InstallTarget::Shell(RPMFUSION_FREE_EL.to_string()),
            InstallTarget::Shell(RPMFUSION_NONFREE_EL.to_string()),
            InstallTarget::packages(FFMPEG_RPM.iter().copied()),
        ],
        (Family::Sles, _) => vec![
            InstallTarget::command([
                "zypper",
                "ar",
                "-cfp",
                "90",
                PACKMAN_ESSENTIALS,
                "packman-essentials",
            ]),
            InstallTarget::package("ffmpeg-4"),
        ],
        _ => {
            return Err(Error::UnsupportedCombination {
                tier: Tier::Developer,
                platform: platform.label.clone(),
            });
        }
    };
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DistroVersion;

    fn tag(family: Family, version: DistroVersion) -> PlatformTag {
        PlatformTag::new(family, version, "Linux")
    }

    fn names(targets: &[InstallTarget]) -> Vec<String> {
        targets.iter().map(ToString::to_string).collect()
    }

    fn all_platforms() -> Vec<PlatformTag> {
        vec![
            tag(Family::RedHat, DistroVersion::Major(7)),
            tag(Family::RedHat, DistroVersion::Major(8)),
            tag(Family::RedHat, DistroVersion::Major(9)),
            tag(Family::RedHat, DistroVersion::Undefined),
            tag(Family::Ubuntu, DistroVersion::Major(20)),
            tag(Family::Ubuntu, DistroVersion::Major(22)),
            tag(Family::Ubuntu, DistroVersion::Major(24)),
            tag(Family::Ubuntu, DistroVersion::Undefined),
            tag(Family::Sles, DistroVersion::Unversioned),
            tag(Family::Mariner, DistroVersion::Unversioned),
        ]
    }

    #[test]
    fn test_common_is_platform_independent() {
        for platform in all_platforms() {
            let targets = resolve(Tier::Common, &platform).unwrap();
            assert_eq!(names(&targets), ["cmake", "pkg-config", "rocm-hip-runtime"]);
        }
    }

    #[test]
    fn test_core_ubuntu_22_adds_libstdcxx() {
        let u22 = resolve(Tier::Core, &tag(Family::Ubuntu, DistroVersion::Major(22))).unwrap();
        assert_eq!(
            names(&u22),
            ["libva-amdgpu-dev", "rocm-hip-runtime-dev", "libstdc++-12-dev"]
        );

        for v in [20, 24] {
            let targets =
                resolve(Tier::Core, &tag(Family::Ubuntu, DistroVersion::Major(v))).unwrap();
            assert_eq!(names(&targets), ["libva-amdgpu-dev", "rocm-hip-runtime-dev"]);
        }
    }

    #[test]
    fn test_core_ubuntu_undefined_falls_back_to_base_list() {
        let targets = resolve(Tier::Core, &tag(Family::Ubuntu, DistroVersion::Undefined)).unwrap();
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_core_rpm_families() {
        for family in [Family::RedHat, Family::Sles, Family::Mariner] {
            let targets = resolve(Tier::Core, &tag(family, DistroVersion::Unversioned)).unwrap();
            assert_eq!(names(&targets), ["libva-amdgpu-devel", "rocm-hip-runtime-devel"]);
        }
    }

    #[test]
    fn test_runtime() {
        let ubuntu = resolve(Tier::Runtime, &tag(Family::Ubuntu, DistroVersion::Major(22))).unwrap();
        assert_eq!(ubuntu.len(), 6);
        assert_eq!(ubuntu.last(), Some(&InstallTarget::package("vainfo")));

        let rpm = resolve(Tier::Runtime, &tag(Family::Sles, DistroVersion::Unversioned)).unwrap();
        assert_eq!(names(&rpm), ["libva-amdgpu", "mesa-amdgpu-va-drivers", "libva-utils"]);

        let mariner =
            resolve(Tier::Runtime, &tag(Family::Mariner, DistroVersion::Unversioned)).unwrap();
        assert!(mariner.is_empty());
    }

    #[test]
    fn test_developer_ubuntu() {
        let targets =
            resolve(Tier::Developer, &tag(Family::Ubuntu, DistroVersion::Major(24))).unwrap();
        assert_eq!(
            names(&targets),
            ["libavcodec-dev", "libavformat-dev", "libavutil-dev"]
        );
    }

    #[test]
    fn test_developer_redhat_8_bootstrap_order() {
        let targets =
            resolve(Tier::Developer, &tag(Family::RedHat, DistroVersion::Major(8))).unwrap();
        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0], InstallTarget::package(EPEL_8));
        assert_eq!(
            targets[1],
            InstallTarget::packages([RPMFUSION_FREE_8, RPMFUSION_NONFREE_8])
        );
        assert!(targets[2].to_string().ends_with("SDL2-2.0.10-2.el8.x86_64.rpm"));
        assert_eq!(targets[3], InstallTarget::packages(["ffmpeg", "ffmpeg-devel"]));
    }

    #[test]
    fn test_developer_redhat_9_uses_shell_for_substitution() {
        let targets =
            resolve(Tier::Developer, &tag(Family::RedHat, DistroVersion::Major(9))).unwrap();
        assert_eq!(targets.len(), 5);
        let shell: Vec<_> = targets
            .iter()
            .filter(|t| matches!(t, InstallTarget::Shell(_)))
            .collect();
        assert_eq!(shell.len(), 2);
        assert!(shell.iter().all(|t| t.to_string().contains("$(rpm -E %rhel)")));
        assert_eq!(targets[4], InstallTarget::packages(["ffmpeg", "ffmpeg-devel"]));
    }

    #[test]
    fn test_developer_sles_adds_repo_first() {
        let targets =
            resolve(Tier::Developer, &tag(Family::Sles, DistroVersion::Unversioned)).unwrap();
        assert!(matches!(&targets[0], InstallTarget::Command(args) if args[..2] == ["zypper", "ar"]));
        assert_eq!(targets[1], InstallTarget::package("ffmpeg-4"));
    }

    #[test]
    fn test_developer_undefined_combinations_fail() {
        for platform in [
            tag(Family::Mariner, DistroVersion::Unversioned),
            tag(Family::RedHat, DistroVersion::Major(7)),
            tag(Family::RedHat, DistroVersion::Undefined),
        ] {
            let err = resolve(Tier::Developer, &platform).unwrap_err();
            assert!(matches!(
                err,
                Error::UnsupportedCombination { tier: Tier::Developer, .. }
            ));
        }
    }
}
