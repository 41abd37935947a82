//! Product catalog boundary.
//!
//! The product-detail endpoint (`GET /api/products/product/{id}`) has an
//! unconfirmed envelope convention: some deployments wrap the record in
//! `{ "data": … }`, some return it bare. [`ProductEnvelope`] accepts both
//! and callers only ever see the unwrapped [`Product`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductEnvelope {
    Wrapped { data: Product },
    Bare(Product),
}

impl ProductEnvelope {
    /// `data` field when present, the response itself otherwise.
    #[must_use]
    pub fn into_product(self) -> Product {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(product) => product,
        }
    }
}

/// Screen-facing state of the product-detail fetch. Failures surface as a
/// human-readable message with `loading` dropped back to false; there are
/// no retries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductDetailState {
    pub loading: bool,
    pub product: Option<Product>,
    pub error: Option<String>,
}

impl ProductDetailState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn resolve(&mut self, product: Product) {
        self.loading = false;
        self.error = None;
        self.product = Some(product);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_envelope_unwraps_data() {
        let body = r#"{"data": {"id": "p1", "title": "Mug", "price": 12.5}}"#;
        let envelope: ProductEnvelope = serde_json::from_str(body).unwrap();
        let product = envelope.into_product();
        assert_eq!(product.id, "p1");
        assert_eq!(product.title, "Mug");
        assert_eq!(product.price, Some(12.5));
    }

    #[test]
    fn bare_response_is_used_directly() {
        let body = r#"{"id": "p2", "title": "Lamp", "images": ["a.jpg"]}"#;
        let envelope: ProductEnvelope = serde_json::from_str(body).unwrap();
        let product = envelope.into_product();
        assert_eq!(product.id, "p2");
        assert_eq!(product.images, vec!["a.jpg"]);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let body = r#"{"data": {"id": "p3", "seller": {"name": "x"}, "rating": 4.8}}"#;
        let envelope: ProductEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_product().id, "p3");
    }

    #[test]
    fn failure_clears_loading_and_records_message() {
        let mut state = ProductDetailState::default();
        state.begin();
        assert!(state.loading);

        state.fail("Unable to connect.");
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Unable to connect."));
    }

    #[test]
    fn resolve_clears_a_previous_error() {
        let mut state = ProductDetailState::default();
        state.fail("boom");
        state.begin();
        state.resolve(Product {
            id: "p4".into(),
            ..Product::default()
        });
        assert!(state.error.is_none());
        assert_eq!(state.product.as_ref().unwrap().id, "p4");
    }
}
