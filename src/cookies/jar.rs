use cookie::Cookie;
use time::OffsetDateTime;

/// Flat cookie jar for a single session.
///
/// The target API expects one flattened `Cookie` header regardless of which
/// host set a cookie, so the jar keeps a global name → value list with no
/// domain or path partitioning. Names are unique; the last write wins and
/// moves the cookie to the end, which keeps serialization order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            cookies: Vec::new(),
        }
    }

    /// Upsert a cookie.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.cookies.retain(|(n, _)| *n != name);
        self.cookies.push((name, value.into()));
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.cookies.iter().position(|(n, _)| n == name)?;
        Some(self.cookies.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Merge `Set-Cookie` directives from a response.
    ///
    /// Malformed lines are dropped. A directive that expires its cookie
    /// (`Max-Age<=0` or an `Expires` in the past) removes it.
    ///
    /// Returns the number of directives applied.
    pub fn set_from_response<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let now = OffsetDateTime::now_utc();
        let mut applied = 0;

        for line in lines {
            let line = line.as_ref();
            let parsed = match Cookie::parse(line) {
                Ok(c) => c,
                Err(e) => {
                    tracing::debug!(error = %e, "dropping malformed set-cookie line");
                    continue;
                }
            };

            let expired = parsed.max_age().is_some_and(|age| age.is_zero() || age.is_negative())
                || parsed.expires_datetime().is_some_and(|at| at < now);

            if expired {
                self.remove(parsed.name());
            } else {
                self.set(parsed.name(), parsed.value());
            }
            applied += 1;
        }

        applied
    }

    /// Render as a `Cookie` request header value.
    pub fn to_header_string(&self) -> String {
        self.cookies
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }
}
