//! Release version arithmetic

/// Which component of the version to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpLevel {
    Major,
    Minor,
    #[default]
    Patch,
}

impl BumpLevel {
    /// Pick the level from command-line flags; major wins over minor over patch
    pub fn from_flags(major: bool, minor: bool) -> Self {
        if major {
            BumpLevel::Major
        } else if minor {
            BumpLevel::Minor
        } else {
            BumpLevel::Patch
        }
    }
}

/// Compute the next version (without `v` prefix) from the latest tag
///
/// No previous tag yields `0.1.0`. Missing components count as zero and
/// each component is read from its leading digits, so `1.2.3-rc1` bumps
/// like `1.2.3`.
pub fn bump_version(current_tag: Option<&str>, level: BumpLevel) -> String {
    let tag = current_tag.map(strip_v).unwrap_or("");
    if tag.is_empty() {
        return "0.1.0".to_string();
    }

    let mut parts = tag.split('.').map(leading_number);
    let mut major = parts.next().unwrap_or(0);
    let mut minor = parts.next().unwrap_or(0);
    let mut patch = parts.next().unwrap_or(0);

    match level {
        BumpLevel::Major => {
            major += 1;
            minor = 0;
            patch = 0;
        }
        BumpLevel::Minor => {
            minor += 1;
            patch = 0;
        }
        BumpLevel::Patch => patch += 1,
    }

    format!("{}.{}.{}", major, minor, patch)
}

/// Strip a single leading `v` from a tag
pub fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

fn leading_number(component: &str) -> u64 {
    let digits: String = component
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_release() {
        assert_eq!(bump_version(None, BumpLevel::Major), "0.1.0");
        assert_eq!(bump_version(Some(""), BumpLevel::Patch), "0.1.0");
    }

    #[test]
    fn test_bump_levels() {
        assert_eq!(bump_version(Some("v1.2.3"), BumpLevel::Major), "2.0.0");
        assert_eq!(bump_version(Some("v1.2.3"), BumpLevel::Minor), "1.3.0");
        assert_eq!(bump_version(Some("v1.2.3"), BumpLevel::Patch), "1.2.4");
    }

    #[test]
    fn test_short_and_suffixed_tags() {
        assert_eq!(bump_version(Some("v2"), BumpLevel::Patch), "2.0.1");
        assert_eq!(bump_version(Some("1.4"), BumpLevel::Minor), "1.5.0");
        assert_eq!(bump_version(Some("v1.2.3-rc1"), BumpLevel::Patch), "1.2.4");
    }

    #[test]
    fn test_level_from_flags() {
        assert_eq!(BumpLevel::from_flags(true, true), BumpLevel::Major);
        assert_eq!(BumpLevel::from_flags(false, true), BumpLevel::Minor);
        assert_eq!(BumpLevel::from_flags(false, false), BumpLevel::Patch);
    }

    #[test]
    fn test_strip_v() {
        assert_eq!(strip_v("v1.0.0"), "1.0.0");
        assert_eq!(strip_v("1.0.0"), "1.0.0");
    }
}
