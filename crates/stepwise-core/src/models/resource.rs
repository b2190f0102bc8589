//! Resolved learning resources and their embed classification.

use serde::{Deserialize, Serialize};

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// The learning resource attached to the currently selected step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ResolvedResource {
    /// A link, either taken from the step or supplied by the fallback service
    Url(String),
    /// Short reading material supplied by the fallback service
    Text(String),
    /// Nothing usable was found
    #[default]
    None,
}

impl ResolvedResource {
    /// The raw resolved value, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedResource::Url(value) | ResolvedResource::Text(value) => Some(value),
            ResolvedResource::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedResource::None)
    }

    /// Classifies the resolved value for presentation.
    ///
    /// The classification looks at the value itself rather than the variant:
    /// fallback text that happens to be a web address is embedded like a link.
    pub fn embed(&self) -> ResourceEmbed {
        match self.as_str() {
            None => ResourceEmbed::Empty,
            Some(value) if value.starts_with("http") => match youtube_video_id(value) {
                Some(video_id) => ResourceEmbed::Video {
                    player_url: format!("{YOUTUBE_EMBED_BASE}{video_id}"),
                    video_id,
                },
                None => ResourceEmbed::Page {
                    url: value.to_string(),
                },
            },
            Some(value) => ResourceEmbed::Text(value.to_string()),
        }
    }
}

/// How a resolved resource should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEmbed {
    /// A video on a known hosting domain, played through its embed player
    Video {
        video_id: String,
        player_url: String,
    },
    /// Any other web address, embedded generically with an "open externally"
    /// affordance
    Page { url: String },
    /// Literal reading material, rendered as formatted markdown
    Text(String),
    /// No resource for this step
    Empty,
}

/// Extracts the video id from the two known YouTube URL shapes: the short
/// per-video path (`youtu.be/<id>`) and the `v=<id>` query parameter.
fn youtube_video_id(url: &str) -> Option<String> {
    let id = if url.contains("youtu.be") {
        url.rsplit('/')
            .next()
            .and_then(|segment| segment.split('?').next())
    } else if url.contains("youtube.com") {
        url.split("v=")
            .nth(1)
            .and_then(|query| query.split('&').next())
    } else {
        None
    };

    id.filter(|id| !id.is_empty()).map(String::from)
}
