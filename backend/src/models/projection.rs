//! Stored rows → wire shapes.
//!
//! The storage-assigned UUID never reaches clients under its native column;
//! it is always re-emitted as the string field `id`. Everything else passes
//! through untouched.

use super::product::{Product, ProductRecord, ProductSummary, ProductSummaryRecord};

pub trait IntoWire {
    type Wire;

    fn into_wire(self) -> Self::Wire;
}

impl IntoWire for ProductRecord {
    type Wire = Product;

    fn into_wire(self) -> Product {
        Product {
            id: self.id.to_string(),
            slug: self.slug,
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
            hero_image: self.hero_image,
            images: self.images,
            features: self.features,
            tags: self.tags,
            specs: self.specs.0,
        }
    }
}

impl IntoWire for ProductSummaryRecord {
    type Wire = ProductSummary;

    fn into_wire(self) -> ProductSummary {
        ProductSummary {
            id: self.id.to_string(),
            slug: self.slug,
            title: self.title,
            subtitle: self.subtitle,
            price: self.price,
            category: self.category,
            hero_image: self.hero_image,
            tags: self.tags,
        }
    }
}

// Already projected: nothing left to rename.
impl IntoWire for Product {
    type Wire = Product;

    fn into_wire(self) -> Product {
        self
    }
}

impl IntoWire for ProductSummary {
    type Wire = ProductSummary;

    fn into_wire(self) -> ProductSummary {
        self
    }
}

impl<T: IntoWire> IntoWire for Option<T> {
    type Wire = Option<T::Wire>;

    fn into_wire(self) -> Self::Wire {
        self.map(IntoWire::into_wire)
    }
}
