/// Optional collaborator recording old→new path redirects after resource
/// replacement.
pub trait RedirectRecorder {
    /// Whether a redirect is already registered for `source_path`.
    fn has_redirect_for(&self, source_path: &str) -> bool;

    /// Register a redirect from `source_path` to `target_path` with the given
    /// HTTP status code.
    fn add_redirect(&mut self, source_path: &str, target_path: &str, status: u16);
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One recorded redirect.
pub struct Redirect {
    /// Old externally addressable path.
    pub source_path: String,
    /// New externally addressable path.
    pub target_path: String,
    /// HTTP status code, e.g. 301 for a permanent redirect.
    pub status: u16,
}

#[derive(Clone, Debug, Default)]
/// Reference in-memory [`RedirectRecorder`].
pub struct MemoryRedirectRecorder {
    redirects: Vec<Redirect>,
}

impl MemoryRedirectRecorder {
    /// Construct an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a recorder preloaded with existing redirects.
    pub fn with_redirects(redirects: Vec<Redirect>) -> Self {
        Self { redirects }
    }

    /// Redirects recorded so far, in registration order.
    pub fn redirects(&self) -> &[Redirect] {
        &self.redirects
    }

    /// Consume the recorder, returning its redirects.
    pub fn into_redirects(self) -> Vec<Redirect> {
        self.redirects
    }
}

impl RedirectRecorder for MemoryRedirectRecorder {
    fn has_redirect_for(&self, source_path: &str) -> bool {
        self.redirects.iter().any(|r| r.source_path == source_path)
    }

    fn add_redirect(&mut self, source_path: &str, target_path: &str, status: u16) {
        self.redirects.push(Redirect {
            source_path: source_path.to_string(),
            target_path: target_path.to_string(),
            status,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/redirects.rs"]
mod tests;
