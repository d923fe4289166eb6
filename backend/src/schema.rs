//! Static shape of the `product` collection, published for external admin
//! tooling. The service itself never reads it back.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "array<string>")]
    StringList,
    #[serde(rename = "object<string,string>")]
    StringMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub collection: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    pub schemas: Vec<CollectionSchema>,
}

fn required(name: &'static str, field_type: FieldType, description: &'static str) -> FieldSchema {
    FieldSchema {
        name,
        field_type,
        required: true,
        default: None,
        minimum: None,
        description,
    }
}

fn optional(name: &'static str, field_type: FieldType, description: &'static str) -> FieldSchema {
    let default = match field_type {
        FieldType::StringList => json!([]),
        FieldType::StringMap => json!({}),
        _ => Value::Null,
    };
    FieldSchema {
        name,
        field_type,
        required: false,
        default: Some(default),
        minimum: None,
        description,
    }
}

pub fn product_schema() -> CollectionSchema {
    use FieldType::*;

    CollectionSchema {
        name: "Product",
        collection: "product",
        description: "Products collection schema",
        fields: vec![
            required("slug", String, "URL-friendly unique identifier"),
            required("title", String, "Product title"),
            optional("subtitle", String, "Short headline under title"),
            optional("description", String, "Product description"),
            FieldSchema {
                minimum: Some(0.0),
                ..optional("price", Number, "Price in dollars")
            },
            required("category", String, "Product category"),
            FieldSchema {
                default: Some(json!(true)),
                ..optional("in_stock", Boolean, "Whether product is in stock")
            },
            optional("hero_image", String, "Main hero image path"),
            optional("images", StringList, "Gallery image paths"),
            optional("features", StringList, "Bulleted feature list"),
            optional("specs", StringMap, "Key-value technical specs"),
            optional("tags", StringList, "Search tags"),
        ],
    }
}

pub fn schema_document() -> SchemaDocument {
    SchemaDocument {
        schemas: vec![product_schema()],
    }
}
