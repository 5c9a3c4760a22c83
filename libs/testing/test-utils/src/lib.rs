//! Shared test utilities for the domain crates
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic test data (always available)
//! - `assertions`: small assertion helpers (always available)
//!
//! # Features
//!
//! - `mongo`: enables the MongoDB container. Tests using it need Docker and
//!   are marked `#[ignore]`; run them with `cargo test -- --ignored`.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!     let db = mongo.database(&builder.database_name());
//! }
//! ```

use bson::oid::ObjectId;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for deterministic test data
///
/// Everything derives from one seed, so a test sees the same values on
/// every run.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name (recommended).
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// An ObjectId nothing else generates
    pub fn object_id(&self) -> ObjectId {
        let bytes = self.seed.to_be_bytes();
        let mut oid = [0u8; 12];
        oid[..8].copy_from_slice(&bytes);
        oid[8..].copy_from_slice(&bytes[..4]);
        ObjectId::from_bytes(oid)
    }

    /// A unique, valid, already-normalized email address
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let email = TestDataBuilder::new(7).email("jane");
    /// assert_eq!(email, "jane.7@example.com");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local.to_lowercase(), self.seed)
    }

    /// A database name unique to this seed
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
