use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;

/// Source of per-hash salts.
pub trait SaltSource: Send + Sync + 'static {
    /// Produce a fresh salt for a single hash.
    fn generate(&self) -> SaltString;
}

/// Salt source drawing from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn generate(&self) -> SaltString {
        SaltString::generate(&mut OsRng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_salt_source_yields_distinct_salts() {
        let source = OsSaltSource;
        assert_ne!(source.generate().as_str(), source.generate().as_str());
    }
}
