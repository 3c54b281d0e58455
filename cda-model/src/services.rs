use crate::{ContentTypeField, ContentTypeRegistry};

/// Supplies the field schema of a content type.
///
/// Lookups are synchronous and must not perform I/O; fetch content types
/// before resolving.
pub trait ContentTypeSource {
    /// Ordered field schema of `content_type_id`, or `None` if unknown.
    fn content_type_fields(&self, content_type_id: &str) -> Option<&[ContentTypeField]>;
}

/// Answers whether an asset id exists even though it is absent from the payload.
pub trait AssetValidityChecker {
    fn is_valid_asset(&self, id: &str) -> bool;
}

/// Supplies the content type id of an entry absent from the payload.
pub trait ContentTypeIdProvider {
    fn content_type_id(&self, entry_id: &str) -> Option<String>;
}

impl<F> AssetValidityChecker for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid_asset(&self, id: &str) -> bool {
        self(id)
    }
}

impl<F> ContentTypeIdProvider for F
where
    F: Fn(&str) -> Option<String>,
{
    fn content_type_id(&self, entry_id: &str) -> Option<String> {
        self(entry_id)
    }
}

/// Oracle that knows nothing: no asset is valid and no entry has a content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOracle;

impl AssetValidityChecker for NoOracle {
    fn is_valid_asset(&self, _id: &str) -> bool {
        false
    }
}

impl ContentTypeIdProvider for NoOracle {
    fn content_type_id(&self, _entry_id: &str) -> Option<String> {
        None
    }
}

/// The collaborator services one resolution pass consults.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub content_types: &'a dyn ContentTypeSource,
    pub assets: &'a dyn AssetValidityChecker,
    pub content_type_ids: &'a dyn ContentTypeIdProvider,
}

impl<'a> Services<'a> {
    /// Services with the given schema source and oracles that know nothing.
    pub fn new(content_types: &'a dyn ContentTypeSource) -> Self {
        Self {
            content_types,
            assets: &NoOracle,
            content_type_ids: &NoOracle,
        }
    }

    pub fn with_asset_checker(mut self, assets: &'a dyn AssetValidityChecker) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_content_type_ids(mut self, provider: &'a dyn ContentTypeIdProvider) -> Self {
        self.content_type_ids = provider;
        self
    }
}

impl<'a> From<&'a ContentTypeRegistry> for Services<'a> {
    fn from(registry: &'a ContentTypeRegistry) -> Self {
        Self::new(registry)
    }
}

impl std::fmt::Debug for Services<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
