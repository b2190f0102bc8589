//! Learning resource resolution for a selected step.
//!
//! The resolver looks for the first markdown link in the step body. A link
//! that is missing, or whose URL contains one of the placeholder markers
//! (`example`, `broken`), is replaced by whatever the fallback resource
//! service suggests. The marker check is a crude placeholder filter, not a
//! reachability probe.
//!
//! Resolution never fails: a fallback transport error resolves to
//! [`ResolvedResource::None`].

use std::sync::{Arc, OnceLock};

use log::{debug, warn};
use regex::Regex;

use crate::{
    models::{FallbackMaterial, ResolvedResource},
    services::FallbackResourceService,
};

const PLACEHOLDER_MARKERS: [&str; 2] = ["example", "broken"];

fn inline_link() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[(.*?)\]\((https?://[^\s)]+)\)").expect("inline link pattern is valid")
    })
}

/// Returns the URL of the first markdown inline link with a web address.
pub fn extract_link(step_content: &str) -> Option<&str> {
    inline_link()
        .captures(step_content)
        .and_then(|caps| caps.get(2))
        .map(|url| url.as_str())
}

/// Whether a URL looks like a placeholder that should not be shown.
pub fn is_broken_link(url: &str) -> bool {
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| url.contains(marker))
}

impl From<FallbackMaterial> for ResolvedResource {
    fn from(material: FallbackMaterial) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (
            non_empty(material.resource_link),
            non_empty(material.text_material),
        ) {
            (Some(link), _) => ResolvedResource::Url(link),
            (None, Some(text)) => ResolvedResource::Text(text),
            (None, None) => ResolvedResource::None,
        }
    }
}

/// Resolves the resource to show next to a step.
#[derive(Clone)]
pub struct ResourceResolver {
    fallback: Arc<dyn FallbackResourceService>,
}

impl ResourceResolver {
    pub fn new(fallback: Arc<dyn FallbackResourceService>) -> Self {
        Self { fallback }
    }

    /// Resolves the resource for the given step body.
    ///
    /// A usable link is returned without any network call; otherwise the
    /// fallback service is asked exactly once with the full step body.
    pub async fn resolve(&self, step_content: &str) -> ResolvedResource {
        match extract_link(step_content) {
            Some(url) if !is_broken_link(url) => {
                debug!("Using step link {url}");
                ResolvedResource::Url(url.to_string())
            }
            Some(url) => {
                debug!("Step link {url} looks like a placeholder, asking for fallback");
                self.fallback(step_content).await
            }
            None => {
                debug!("Step has no link, asking for fallback");
                self.fallback(step_content).await
            }
        }
    }

    async fn fallback(&self, step_content: &str) -> ResolvedResource {
        match self.fallback.fallback_material(step_content).await {
            Ok(material) => material.into(),
            Err(e) => {
                warn!("Fallback resource lookup failed: {e}");
                ResolvedResource::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{Result, StudyError};

    struct MockFallback {
        response: Option<FallbackMaterial>,
        calls: Mutex<Vec<String>>,
    }

    impl MockFallback {
        fn returning(response: FallbackMaterial) -> Arc<Self> {
            Arc::new(Self {
                response: Some(response),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FallbackResourceService for MockFallback {
        async fn fallback_material(&self, step_content: &str) -> Result<FallbackMaterial> {
            self.calls.lock().unwrap().push(step_content.to_string());
            self.response.clone().ok_or(StudyError::Server {
                status: 503,
                url: "/fallback_material".to_string(),
            })
        }
    }

    fn link(url: &str) -> FallbackMaterial {
        FallbackMaterial {
            resource_link: Some(url.to_string()),
            text_material: None,
        }
    }

    #[test]
    fn test_extract_first_link_only() {
        let content = "Read [one](https://a.test/1) then [two](https://b.test/2)";
        assert_eq!(extract_link(content), Some("https://a.test/1"));
    }

    #[test]
    fn test_extract_ignores_non_web_links() {
        assert_eq!(extract_link("See [notes](notes.md) and [ftp](ftp://x.test)"), None);
        assert_eq!(extract_link("no links here"), None);
    }

    #[test]
    fn test_placeholder_markers() {
        assert!(is_broken_link("https://example.com/rust"));
        assert!(is_broken_link("https://docs.test/broken-page"));
        assert!(!is_broken_link("https://doc.rust-lang.org/book/"));
    }

    #[tokio::test]
    async fn test_clean_link_skips_fallback() {
        let fallback = MockFallback::returning(link("https://other.test"));
        let resolver = ResourceResolver::new(fallback.clone());

        let resolved = resolver
            .resolve("Read [the book](https://doc.rust-lang.org/book/) first.")
            .await;

        assert_eq!(
            resolved,
            ResolvedResource::Url("https://doc.rust-lang.org/book/".to_string())
        );
        assert!(fallback.calls().is_empty());
    }

    #[tokio::test]
    async fn test_example_link_goes_through_fallback() {
        let fallback = MockFallback::returning(link("https://good.test/x"));
        let resolver = ResourceResolver::new(fallback.clone());
        let content = "Watch [this](https://example.com/video)";

        let resolved = resolver.resolve(content).await;

        assert_eq!(resolved, ResolvedResource::Url("https://good.test/x".to_string()));
        assert_eq!(fallback.calls(), vec![content.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_link_uses_text_material() {
        let fallback = MockFallback::returning(FallbackMaterial {
            resource_link: None,
            text_material: Some("A short reading passage.".to_string()),
        });
        let resolver = ResourceResolver::new(fallback.clone());

        let resolved = resolver.resolve("No links in this step").await;

        assert_eq!(
            resolved,
            ResolvedResource::Text("A short reading passage.".to_string())
        );
        assert_eq!(fallback.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_link_is_preferred_over_text_material() {
        let fallback = MockFallback::returning(FallbackMaterial {
            resource_link: Some("https://good.test/x".to_string()),
            text_material: Some("ignored".to_string()),
        });
        let resolver = ResourceResolver::new(fallback);

        let resolved = resolver.resolve("[bad](https://broken.test)").await;

        assert_eq!(resolved, ResolvedResource::Url("https://good.test/x".to_string()));
    }

    #[tokio::test]
    async fn test_empty_fallback_response_resolves_to_none() {
        let fallback = MockFallback::returning(FallbackMaterial {
            resource_link: Some(String::new()),
            text_material: None,
        });
        let resolver = ResourceResolver::new(fallback);

        assert_eq!(resolver.resolve("nothing").await, ResolvedResource::None);
    }

    #[tokio::test]
    async fn test_fallback_failure_resolves_to_none() {
        let fallback = MockFallback::failing();
        let resolver = ResourceResolver::new(fallback.clone());

        let resolved = resolver.resolve("[x](https://example.org)").await;

        assert_eq!(resolved, ResolvedResource::None);
        assert_eq!(fallback.calls().len(), 1);
    }
}
