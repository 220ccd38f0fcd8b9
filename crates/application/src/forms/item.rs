use domain::{Item, ItemId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_blank, validate_priced};
use crate::errors::FormError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    pub description: Option<String>,
    /// Sale price or internal cost
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Stock must be non-negative"))]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: Option<u32>,
}

impl ItemForm {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            stock: item.stock.map(i64::from),
        }
    }

    pub fn validated(&self) -> Result<ItemDraft, FormError> {
        validate_priced(self, self.price)?;

        let stock = self
            .stock
            .map(u32::try_from)
            .transpose()
            .map_err(|_| FormError::field("stock", "Stock is too large"))?;

        Ok(ItemDraft {
            name: self.name.clone(),
            description: non_blank(&self.description),
            price: self.price,
            stock,
        })
    }
}

impl ItemDraft {
    pub fn into_item(self, id: ItemId) -> Item {
        let mut item = Item::new(id, String::new(), 0.0);
        self.apply(&mut item);
        item
    }

    pub fn apply(self, item: &mut Item) {
        item.name = self.name;
        item.description = self.description;
        item.price = self.price;
        item.stock = self.stock;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_schema_messages() {
        let form = ItemForm {
            stock: Some(-1),
            ..ItemForm::new("", 3.5)
        };
        let err = form.validated().unwrap_err();

        assert_eq!(err.fields.first("name"), Some("Item name is required"));
        assert_eq!(err.fields.first("stock"), Some("Stock must be non-negative"));
        assert!(!err.fields.contains("price"));
    }

    #[test]
    fn test_stock_is_optional() {
        let draft = ItemForm::new("Squeegee", 12.0).validated().unwrap();
        let item = draft.into_item(ItemId::new("i9"));

        assert_eq!(item.stock, None);
        assert_eq!(item.name, "Squeegee");
    }
}
