use std::fmt;

/// Default SP-relative root under which application entities are created.
pub const DEFAULT_CSE_ROOT: &str = "/in-cse/in-name";

/// A slash-separated path identifying a node in the CSE resource tree.
///
/// Built by plain string concatenation; no normalization is performed, so
/// duplicate or trailing slashes are the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceAddress(String);

impl ResourceAddress {
    /// Wrap a raw path.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append one path segment.
    ///
    /// # Example
    /// ```
    /// use meterlink_common::ResourceAddress;
    ///
    /// let data = ResourceAddress::new("/in-cse/in-name/MY_METER").child("DATA");
    /// assert_eq!(data.as_str(), "/in-cse/in-name/MY_METER/DATA");
    /// ```
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}/{}", self.0, segment))
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceAddress {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Builder for addresses under a CSE root.
///
/// Addresses follow the pattern `<root>/<AE>/<container>`.
#[derive(Debug, Clone)]
pub struct AddressBuilder {
    root: String,
}

impl AddressBuilder {
    /// Create a builder for the given CSE root.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// The CSE root itself (where application entities are created).
    pub fn root(&self) -> ResourceAddress {
        ResourceAddress::new(self.root.clone())
    }

    /// Address of an application entity.
    ///
    /// # Example
    /// ```
    /// use meterlink_common::{AddressBuilder, DEFAULT_CSE_ROOT};
    ///
    /// let builder = AddressBuilder::new(DEFAULT_CSE_ROOT);
    /// assert_eq!(builder.ae("MY_METER").as_str(), "/in-cse/in-name/MY_METER");
    /// ```
    pub fn ae(&self, ae: &str) -> ResourceAddress {
        ResourceAddress::new(format!("{}/{}", self.root, ae))
    }

    /// Address of a container under an application entity.
    ///
    /// # Example
    /// ```
    /// use meterlink_common::{AddressBuilder, DEFAULT_CSE_ROOT};
    ///
    /// let builder = AddressBuilder::new(DEFAULT_CSE_ROOT);
    /// assert_eq!(
    ///     builder.container("MY_METER", "DATA").as_str(),
    ///     "/in-cse/in-name/MY_METER/DATA"
    /// );
    /// ```
    pub fn container(&self, ae: &str, container: &str) -> ResourceAddress {
        ResourceAddress::new(format!("{}/{}/{}", self.root, ae, container))
    }
}

impl Default for AddressBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CSE_ROOT)
    }
}
