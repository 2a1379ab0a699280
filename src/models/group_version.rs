//! API group/version parsing
//!
//! Owner references carry an `apiVersion` string such as `apps/v1` or `v1`.
//! Parsing follows the API machinery rules: an empty string (or a lone `/`)
//! is the empty group/version, a string without a slash is a version in the
//! core group, and more than one slash is rejected.

use std::fmt;
use std::str::FromStr;

/// A parsed API group and version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Check if this is the empty group/version
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty()
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

impl FromStr for GroupVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "/" {
            return Ok(GroupVersion::default());
        }

        match s.split_once('/') {
            None => Ok(GroupVersion::new("", s)),
            Some((group, version)) if !version.contains('/') => {
                Ok(GroupVersion::new(group, version))
            }
            Some(_) => Err(format!("unexpected GroupVersion string: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_core_group() {
        let gv: GroupVersion = "v1".parse().unwrap();
        assert_eq!(gv, GroupVersion::new("", "v1"));
        assert_eq!(gv.to_string(), "v1");
    }

    #[test]
    fn test_parse_named_group() {
        let gv: GroupVersion = "apps/v1".parse().unwrap();
        assert_eq!(gv.group, "apps");
        assert_eq!(gv.version, "v1");
        assert_eq!(gv.to_string(), "apps/v1");

        let gv: GroupVersion = "kustomize.toolkit.fluxcd.io/v1beta2".parse().unwrap();
        assert_eq!(gv.group, "kustomize.toolkit.fluxcd.io");
        assert_eq!(gv.version, "v1beta2");
    }

    #[test]
    fn test_parse_empty() {
        assert!("".parse::<GroupVersion>().unwrap().is_empty());
        assert!("/".parse::<GroupVersion>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_too_many_slashes() {
        let err = "apps/v1/extra".parse::<GroupVersion>().unwrap_err();
        assert!(err.contains("apps/v1/extra"));
        assert!("a/b/c/d".parse::<GroupVersion>().is_err());
    }
}
