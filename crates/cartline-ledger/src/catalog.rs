use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cartline_types::{Product, ProductId};

/// Product lookup used when replaying operation logs.
///
/// The cart core never fetches products itself; whoever drives it supplies a
/// catalog built from the surrounding system's data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: HashMap<ProductId, Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}
