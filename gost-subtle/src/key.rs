use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyKind {
    /// Symmetric key, HMAC key or password.
    Secret,
    Private,
    Public,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Secret => "secret",
            Self::Private => "private",
            Self::Public => "public",
        })
    }
}

/// Key bytes tagged with their role.
///
/// Lengths are checked by the algorithm the key is used with, not here.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    kind: KeyKind,
    bytes: Vec<u8>,
}

impl KeyMaterial {
    pub fn new(kind: KeyKind, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    pub fn secret(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(KeyKind::Secret, bytes)
    }

    pub fn private(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(KeyKind::Private, bytes)
    }

    pub fn public(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(KeyKind::Public, bytes)
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("KeyMaterial");
        s.field("kind", &self.kind).field("len", &self.bytes.len());
        if self.kind == KeyKind::Public {
            s.field("bytes", &self.bytes);
        }
        s.finish()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for KeyMaterial {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.bytes);
    }
}

/// Result of `generateKey`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratedKey {
    Secret(KeyMaterial),
    Pair {
        private_key: KeyMaterial,
        public_key: KeyMaterial,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secret_bytes() {
        let secret = format!("{:?}", KeyMaterial::secret(vec![0xab; 32]));
        assert!(!secret.contains("171"));
        assert!(secret.contains("len: 32"));
        let public = format!("{:?}", KeyMaterial::public(vec![7; 2]));
        assert!(public.contains("[7, 7]"));
    }
}
