use crate::{client::Client, config::Config, error::TryOnError, types::ClothingItem};

/// API resource for `GET /api/clothing`
pub struct Catalog<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Catalog<'c, C> {
    /// Creates a new Catalog resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetches every clothing item, in server order
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list of items.
    pub async fn list(&self) -> Result<Vec<ClothingItem>, TryOnError> {
        self.client.get("/api/clothing").await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Catalog API resource
    #[must_use]
    pub const fn catalog(&self) -> Catalog<'_, C> {
        Catalog::new(self)
    }
}
