//! Typed oneM2M resource bodies.
//!
//! Serialization uses the oneM2M short names (`rn`, `api`, `rr`, `cnf`,
//! `con`) and the `m2m:*` envelope keys the HTTP binding expects.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// The resource types this client creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ApplicationEntity,
    Container,
    ContentInstance,
}

impl ResourceKind {
    /// Numeric oneM2M resource-type code, used in the `ty` parameter of the
    /// create request's content type.
    pub fn type_code(&self) -> u8 {
        match self {
            ResourceKind::ApplicationEntity => 2,
            ResourceKind::Container => 3,
            ResourceKind::ContentInstance => 4,
        }
    }

    /// The `m2m:*` envelope key wrapping this resource's body.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            ResourceKind::ApplicationEntity => "m2m:ae",
            ResourceKind::Container => "m2m:cnt",
            ResourceKind::ContentInstance => "m2m:cin",
        }
    }

    /// Map an envelope key back to a kind (used to tag responses).
    pub fn from_envelope_key(key: &str) -> Option<Self> {
        match key {
            "m2m:ae" => Some(ResourceKind::ApplicationEntity),
            "m2m:cnt" => Some(ResourceKind::Container),
            "m2m:cin" => Some(ResourceKind::ContentInstance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ApplicationEntity => "AE",
            ResourceKind::Container => "container",
            ResourceKind::ContentInstance => "contentInstance",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application-entity registration body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ae {
    /// Resource name, fixed for the process lifetime.
    #[serde(rename = "rn")]
    pub resource_name: String,

    /// Application identifier. Mandatory for AE creation.
    #[serde(rename = "api")]
    pub app_id: String,

    /// Whether the CSE may initiate requests toward this AE. Mandatory;
    /// this device never accepts inbound callbacks, so it is always false.
    #[serde(rename = "rr")]
    pub request_reachability: bool,
}

impl Ae {
    pub fn new(resource_name: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            app_id: app_id.into(),
            request_reachability: false,
        }
    }
}

/// Container grouping time-ordered content instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename = "rn")]
    pub resource_name: String,
}

impl Container {
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
        }
    }
}

/// One immutable data point pushed into a container.
///
/// Fire-and-forget: constructed per publish and dropped once the create
/// call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInstance {
    /// MIME type of the content.
    #[serde(rename = "cnf")]
    pub content_info: String,

    /// Payload, carried as a UTF-8 string.
    #[serde(rename = "con")]
    pub content: String,
}

impl ContentInstance {
    /// A text content instance (`application/text`), the only flavor the
    /// meter publishes.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content_info: "application/text".to_string(),
            content: content.into(),
        }
    }
}

/// Typed union handed to create calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Ae(Ae),
    Container(Container),
    ContentInstance(ContentInstance),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Ae(_) => ResourceKind::ApplicationEntity,
            Resource::Container(_) => ResourceKind::Container,
            Resource::ContentInstance(_) => ResourceKind::ContentInstance,
        }
    }

    /// Request body in the oneM2M JSON envelope, e.g. `{"m2m:ae": {...}}`.
    pub fn to_body(&self) -> serde_json::Value {
        let key = self.kind().envelope_key();
        match self {
            Resource::Ae(ae) => json!({ (key): ae }),
            Resource::Container(container) => json!({ (key): container }),
            Resource::ContentInstance(instance) => json!({ (key): instance }),
        }
    }
}

impl From<Ae> for Resource {
    fn from(ae: Ae) -> Self {
        Resource::Ae(ae)
    }
}

impl From<Container> for Resource {
    fn from(container: Container) -> Self {
        Resource::Container(container)
    }
}

impl From<ContentInstance> for Resource {
    fn from(instance: ContentInstance) -> Self {
        Resource::ContentInstance(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(ResourceKind::ApplicationEntity.type_code(), 2);
        assert_eq!(ResourceKind::Container.type_code(), 3);
        assert_eq!(ResourceKind::ContentInstance.type_code(), 4);
    }

    #[test]
    fn test_envelope_key_round_trip() {
        for kind in [
            ResourceKind::ApplicationEntity,
            ResourceKind::Container,
            ResourceKind::ContentInstance,
        ] {
            assert_eq!(ResourceKind::from_envelope_key(kind.envelope_key()), Some(kind));
        }
        assert_eq!(ResourceKind::from_envelope_key("m2m:sub"), None);
    }

    #[test]
    fn test_ae_body() {
        let ae = Ae::new("MY_METER", "app1");
        assert!(!ae.request_reachability);

        let body = Resource::from(ae).to_body();
        assert_eq!(
            body,
            serde_json::json!({
                "m2m:ae": { "rn": "MY_METER", "api": "app1", "rr": false }
            })
        );
    }

    #[test]
    fn test_container_body() {
        let body = Resource::from(Container::new("DATA")).to_body();
        assert_eq!(body, serde_json::json!({ "m2m:cnt": { "rn": "DATA" } }));
    }

    #[test]
    fn test_content_instance_body() {
        let instance = ContentInstance::text("{\"kWH\": 7}");
        assert_eq!(instance.content_info, "application/text");

        let body = Resource::from(instance).to_body();
        assert_eq!(
            body,
            serde_json::json!({
                "m2m:cin": { "cnf": "application/text", "con": "{\"kWH\": 7}" }
            })
        );
    }
}
