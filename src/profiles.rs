use crate::error::{Result, ScanError};

/// A named preset of nmap flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProfile {
    pub name: &'static str,
    /// Flags inserted between the tool name and the target.
    pub flags: &'static str,
    pub description: &'static str,
    /// Rough duration class shown to the user before the scan starts.
    pub duration: &'static str,
}

/// Profile the CLI uses when `--profile` is omitted.
pub const DEFAULT_PROFILE: &str = "discovery";

/// Profile that gets the longer scan timeout.
pub const VULNERABILITY_PROFILE: &str = "vulnerability";

static PROFILES: [ScanProfile; 5] = [
    ScanProfile {
        name: "discovery",
        flags: "-sn",
        description: "Host discovery only",
        duration: "Fast",
    },
    ScanProfile {
        name: "quick",
        flags: "-sS -T4 -F",
        description: "Quick TCP port scan",
        duration: "Medium",
    },
    ScanProfile {
        name: "comprehensive",
        flags: "-sS -sV -sC -O -A",
        description: "Comprehensive scan with OS/version detection",
        duration: "Slow",
    },
    ScanProfile {
        name: VULNERABILITY_PROFILE,
        flags: "-sV --script vuln,safe",
        description: "Vulnerability assessment",
        duration: "Very Slow",
    },
    ScanProfile {
        name: "udp",
        flags: "-sU --top-ports 100",
        description: "Top UDP ports scan",
        duration: "Medium",
    },
];

/// All profiles in table order.
pub fn all() -> &'static [ScanProfile] {
    &PROFILES
}

/// Profile names in table order, suitable for a CLI value parser.
pub fn names() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.name).collect()
}

/// Look up a profile by exact name.
pub fn find(name: &str) -> Result<&'static ScanProfile> {
    PROFILES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| ScanError::InvalidProfile {
            name: name.to_string(),
            valid: names(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_is_fully_described() {
        for p in all() {
            assert!(!p.flags.trim().is_empty(), "{} has no flags", p.name);
            assert!(!p.description.trim().is_empty(), "{} has no description", p.name);
            assert!(!p.duration.trim().is_empty(), "{} has no duration", p.name);
        }
    }

    #[test]
    fn table_has_the_five_profiles_in_order() {
        assert_eq!(
            names(),
            vec!["discovery", "quick", "comprehensive", "vulnerability", "udp"]
        );
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("udp").unwrap().flags, "-sU --top-ports 100");
        assert_eq!(find(DEFAULT_PROFILE).unwrap().flags, "-sn");
        match find("Quick") {
            Err(ScanError::InvalidProfile { name, valid }) => {
                assert_eq!(name, "Quick");
                assert_eq!(valid.len(), 5);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
