//! Uploaded documents and per-request identifiers

use std::fmt;

/// Unique identifier for one analysis request, based on UUIDv7
///
/// UUIDv7 sorts chronologically, so request ids in logs read in the order
/// the requests arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalysisId(u128);

impl AnalysisId {
    /// Generate a new UUIDv7-based AnalysisId
    ///
    /// # Examples
    ///
    /// ```
    /// use taxzen_domain::AnalysisId;
    ///
    /// let id = AnalysisId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an AnalysisId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A document received from the caller
///
/// Owned by exactly one extraction run and dropped once its bytes have been
/// turned into an [`ExtractionResult`](crate::ExtractionResult).
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as supplied by the caller
    pub name: String,

    /// Content type declared by the caller (e.g. `application/pdf`)
    pub declared_mime_type: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create a new uploaded file
    pub fn new(
        name: impl Into<String>,
        declared_mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_mime_type: declared_mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the file contents in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file has no contents
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Raw bytes are noise in logs and test failures.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("declared_mime_type", &self.declared_mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
