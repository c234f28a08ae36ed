/// Symmetric key material for document content, supplied by the external
/// login/session layer. Read-only for the duration of a save.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw key material, for handing to the crypto service.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keep key material out of logs.
impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}
