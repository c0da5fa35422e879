//! Where a recording can be streamed from.

use dvr_parser::Resource;

/// Stream URL used when neither the recording entry nor the catalog yields one
pub const DEFAULT_STREAM_URL_TEMPLATE: &str = "http://{host}:{port}/recorded/titleStream?id={id}";

/// A resolved playback location, tagged with how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    /// URL carried in the recording entry itself
    Direct(String),
    /// Item resource found in the media server's catalog
    ContentDirectory(Resource),
    /// URL built from the stream template and the recording id
    Constructed(String),
}

impl PlaybackSource {
    pub fn url(&self) -> &str {
        match self {
            PlaybackSource::Direct(url) | PlaybackSource::Constructed(url) => url,
            PlaybackSource::ContentDirectory(resource) => &resource.url,
        }
    }

    /// Media-type descriptor, known only for catalog resources
    pub fn protocol_info(&self) -> Option<&str> {
        match self {
            PlaybackSource::ContentDirectory(resource) if !resource.protocol_info.is_empty() => {
                Some(&resource.protocol_info)
            }
            _ => None,
        }
    }
}

/// Fill the `{host}`, `{port}` and `{id}` placeholders of a stream template
pub fn construct_stream_url(template: &str, host: &str, port: u16, id: &str) -> String {
    template
        .replace("{host}", host)
        .replace("{port}", &port.to_string())
        .replace("{id}", id)
}
