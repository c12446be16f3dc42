//! Browser profile definitions.

use crate::base::neterror::NetError;
use crate::http::orderedheaders::{generate_sec_ch_ua, OrderedHeaderMap};
use std::fmt;

/// Browser profile category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileType {
    /// Desktop Chrome on Windows (default).
    #[default]
    ChromeWindows,
    /// Desktop Chrome on macOS.
    ChromeMac,
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileType::ChromeWindows => "Chrome/Windows",
            ProfileType::ChromeMac => "Chrome/macOS",
        };
        write!(f, "{name}")
    }
}

/// Encodings offered by desktop Chrome.
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// The baseline header set every request starts from, in wire order.
///
/// Action headers are layered on top: a name already present is updated
/// in place, a new name is appended after the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserProfile {
    pub profile_type: ProfileType,
    pub major_version: u16,
    pub user_agent: String,
    /// `sec-ch-ua-platform` value, quoted.
    pub platform: &'static str,
    /// Origin the web client runs on.
    pub origin: &'static str,
    /// Send `sec-ch-ua` brand list. The web client omits it from API calls.
    pub send_brand_list: bool,
}

impl Default for BrowserProfile {
    fn default() -> Self {
        Self::chrome_windows()
    }
}

impl BrowserProfile {
    /// Chrome 133 on Windows.
    pub fn chrome_windows() -> Self {
        Self {
            profile_type: ProfileType::ChromeWindows,
            major_version: 133,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36".to_string(),
            platform: "\"Windows\"",
            origin: "https://twitter.com",
            send_brand_list: false,
        }
    }

    /// Chrome 133 on macOS.
    pub fn chrome_mac() -> Self {
        Self {
            profile_type: ProfileType::ChromeMac,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36".to_string(),
            platform: "\"macOS\"",
            ..Self::chrome_windows()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_brand_list(mut self, enabled: bool) -> Self {
        self.send_brand_list = enabled;
        self
    }

    /// Build the ordered baseline headers.
    ///
    /// The transport decodes whatever `accept-encoding` offers.
    pub fn baseline_headers(&self) -> Result<OrderedHeaderMap, NetError> {
        let mut headers = OrderedHeaderMap::new();
        headers.insert("accept", "*/*")?;
        headers.insert("accept-encoding", ACCEPT_ENCODING)?;
        headers.insert("content-type", "application/x-www-form-urlencoded")?;
        headers.insert("origin", self.origin)?;
        if self.send_brand_list {
            headers.insert(
                "sec-ch-ua",
                &generate_sec_ch_ua("Chrome", self.major_version, true),
            )?;
        }
        headers.insert("sec-ch-ua-mobile", "?0")?;
        headers.insert("sec-ch-ua-platform", self.platform)?;
        headers.insert("sec-fetch-dest", "empty")?;
        headers.insert("sec-fetch-mode", "cors")?;
        headers.insert("sec-fetch-site", "same-origin")?;
        headers.insert("user-agent", &self.user_agent)?;
        Ok(headers)
    }
}
