//! The two shared page regions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named page region filled from a shared fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Header,
    Footer,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Header, Region::Footer];

    /// Fragment file stem under the components directory.
    pub fn fragment_name(self) -> &'static str {
        match self {
            Region::Header => "header",
            Region::Footer => "footer",
        }
    }

    /// Id of the placeholder element the fragment is injected into.
    pub fn placeholder_id(self) -> &'static str {
        match self {
            Region::Header => "header-placeholder",
            Region::Footer => "footer-placeholder",
        }
    }

    /// Key the fragment HTML is cached under.
    pub fn cache_key(self) -> &'static str {
        match self {
            Region::Header => "rsx_header_html",
            Region::Footer => "rsx_footer_html",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fragment_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_contract() {
        assert_eq!(Region::Header.placeholder_id(), "header-placeholder");
        assert_eq!(Region::Footer.placeholder_id(), "footer-placeholder");
        assert_eq!(Region::Header.cache_key(), "rsx_header_html");
        assert_eq!(Region::Footer.cache_key(), "rsx_footer_html");
        assert_eq!(Region::Footer.to_string(), "footer");
    }
}
