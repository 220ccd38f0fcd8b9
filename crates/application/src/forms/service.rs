use domain::{ItemId, Service, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use super::{non_blank, validate_priced};
use crate::errors::{FieldErrors, FormError};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForm {
    #[validate(length(min = 1, message = "Service name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Duration must be non-negative"))]
    pub duration_minutes: Option<i64>,
    /// Empty selection is allowed
    #[serde(default)]
    pub associated_item_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: Option<u32>,
    pub associated_item_ids: BTreeSet<ItemId>,
}

impl ServiceForm {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price,
            duration_minutes: service.duration_minutes.map(i64::from),
            associated_item_ids: service
                .associated_item_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn validated(&self) -> Result<ServiceDraft, FormError> {
        validate_priced(self, self.price)?;

        let duration_minutes = self
            .duration_minutes
            .map(u32::try_from)
            .transpose()
            .map_err(|_| FormError::field("duration_minutes", "Duration is too large"))?;

        Ok(ServiceDraft {
            name: self.name.clone(),
            description: non_blank(&self.description),
            price: self.price,
            duration_minutes,
            associated_item_ids: self
                .associated_item_ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(ItemId::from)
                .collect(),
        })
    }
}

impl ServiceDraft {
    /// Every selected item must exist in the catalog
    pub fn check_items(&self, exists: impl Fn(&ItemId) -> bool) -> Result<(), FormError> {
        let mut fields = FieldErrors::new();
        for id in self.associated_item_ids.iter().filter(|id| !exists(id)) {
            fields.add("associated_item_ids", format!("Unknown item '{id}'"));
        }
        fields.into_result()
    }

    pub fn into_service(self, id: ServiceId) -> Service {
        let mut service = Service::new(id, String::new(), 0.0);
        self.apply(&mut service);
        service
    }

    pub fn apply(self, service: &mut Service) {
        service.name = self.name;
        service.description = self.description;
        service.price = self.price;
        service.duration_minutes = self.duration_minutes;
        service.associated_item_ids = self.associated_item_ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_and_duration() {
        let form = ServiceForm {
            duration_minutes: Some(-5),
            ..ServiceForm::new("Pressure Washing", -1.0)
        };
        let err = form.validated().unwrap_err();

        assert_eq!(err.fields.first("price"), Some("Price must be non-negative"));
        assert_eq!(
            err.fields.first("duration_minutes"),
            Some("Duration must be non-negative")
        );
    }

    #[test]
    fn test_nan_price_rejected() {
        let err = ServiceForm::new("Odd", f64::NAN).validated().unwrap_err();
        assert_eq!(err.fields.first("price"), Some("Price must be a number"));
    }

    #[test]
    fn test_empty_selection_gives_empty_set() {
        let draft = ServiceForm::new("Pressure Washing", 200.0).validated().unwrap();
        assert!(draft.associated_item_ids.is_empty());
        assert!(draft.check_items(|_| false).is_ok());
    }

    #[test]
    fn test_unknown_items_reported() {
        let form = ServiceForm {
            associated_item_ids: vec!["i1".into(), "i404".into()],
            ..ServiceForm::new("Combo", 10.0)
        };
        let draft = form.validated().unwrap();
        let err = draft
            .check_items(|id| id.as_str() == "i1")
            .unwrap_err();

        assert_eq!(
            err.fields.first("associated_item_ids"),
            Some("Unknown item 'i404'")
        );
    }
}
