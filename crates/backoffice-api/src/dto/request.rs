//! Request DTOs with validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::id::lenient;
use backoffice_core::types::{AssignmentId, CategoryId, CustomerId, ProductId};
use backoffice_entity::assignment::QuantityUpdate;
use backoffice_entity::assignment::quantity::parse_quantity;
use backoffice_entity::category::CreateCategory;
use backoffice_entity::customer::CustomerInput;
use backoffice_entity::product::{CreateProduct, UpdateProduct};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// Create or fully update a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerRequest {
    /// Display name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Kind of project.
    pub project_type: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(req: CustomerRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            phone: req.phone,
            email: req.email,
            project_type: req.project_type,
            notes: req.notes,
        }
    }
}

/// Create category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Category name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional parent.
    #[serde(default, deserialize_with = "lenient::option")]
    pub parent_id: Option<CategoryId>,
}

impl From<CreateCategoryRequest> for CreateCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            parent_id: req.parent_id,
        }
    }
}

/// Move a category; `null` makes it a root.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetParentRequest {
    /// New parent, or `None` for the top level.
    #[serde(default, deserialize_with = "lenient::option")]
    pub parent_id: Option<CategoryId>,
}

/// Create product request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    /// Owning category.
    #[serde(default, deserialize_with = "lenient::option")]
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<CategoryId>,
    /// Unit price, zero when absent.
    pub price: Option<Decimal>,
    /// Optional description.
    pub description: Option<String>,
}

impl CreateProductRequest {
    /// Convert into the entity model. Call after validation.
    pub fn into_entity(self) -> AppResult<CreateProduct> {
        let category_id = self
            .category_id
            .ok_or_else(|| AppError::validation("Category is required"))?;
        Ok(CreateProduct {
            name: self.name,
            category_id,
            price: self.price.unwrap_or(Decimal::ZERO),
            description: self.description,
        })
    }
}

/// Update product request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// Product name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    /// Owning category.
    #[serde(default, deserialize_with = "lenient::option")]
    pub category_id: Option<CategoryId>,
    /// Unit price.
    pub price: Option<Decimal>,
    /// Optional description.
    pub description: Option<String>,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            category_id: req.category_id,
            price: req.price,
            description: req.description,
        }
    }
}

/// Attach a catalog product to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachRequest {
    /// Customer receiving the product.
    #[serde(deserialize_with = "lenient::deserialize")]
    pub customer_id: CustomerId,
    /// Product to attach.
    #[serde(deserialize_with = "lenient::deserialize")]
    pub product_id: ProductId,
    /// Units to add, one when absent.
    pub quantity: Option<i64>,
}

/// Attach an ad hoc product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomProductRequest {
    /// Customer receiving the product.
    #[serde(deserialize_with = "lenient::deserialize")]
    pub customer_id: CustomerId,
    /// Product name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    /// Unit price, zero when absent.
    pub price: Option<Decimal>,
}

/// Set the quantity of one row.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetQuantityRequest {
    /// Raw quantity, checked by [`SetQuantityRequest::quantity`].
    #[serde(default)]
    pub quantity: Value,
}

impl SetQuantityRequest {
    /// The requested quantity as a non-negative integer.
    pub fn quantity(&self) -> AppResult<i32> {
        parse_quantity(&self.quantity)
    }
}

/// Set quantities of many rows at once.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkUpdateRequest {
    /// Raw list of `{id, quantity}` objects.
    #[serde(default)]
    pub updates: Value,
}

impl BulkUpdateRequest {
    /// Parse the update list. It must be a non-empty array whose entries
    /// each carry an integer `id` and a non-negative integer `quantity`.
    pub fn updates(&self) -> AppResult<Vec<QuantityUpdate>> {
        let items = self
            .updates
            .as_array()
            .filter(|items| !items.is_empty())
            .ok_or_else(|| AppError::validation("Updates must be a non-empty list"))?;

        items
            .iter()
            .map(|item| {
                let id = item
                    .get("id")
                    .and_then(|v| v.as_i64().or_else(|| v.as_str()?.trim().parse().ok()))
                    .ok_or_else(|| AppError::validation("Every update needs a numeric id"))?;
                let quantity = parse_quantity(item.get("quantity").unwrap_or(&Value::Null))?;
                Ok(QuantityUpdate {
                    id: AssignmentId(id),
                    quantity,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::error::ErrorKind;
    use serde_json::json;

    fn bulk(updates: Value) -> AppResult<Vec<QuantityUpdate>> {
        BulkUpdateRequest { updates }.updates()
    }

    #[test]
    fn test_attach_accepts_string_customer_id() {
        let req: AttachRequest =
            serde_json::from_value(json!({ "customer_id": "5", "product_id": 3 })).unwrap();
        assert_eq!(req.customer_id, CustomerId(5));
        assert_eq!(req.product_id, ProductId(3));
        assert_eq!(req.quantity, None);
    }

    #[test]
    fn test_attach_rejects_non_numeric_id() {
        let res = serde_json::from_value::<AttachRequest>(json!({ "customer_id": "x", "product_id": 3 }));
        assert!(res.is_err());
    }

    #[test]
    fn test_set_parent_empty_string_is_root() {
        let req: SetParentRequest = serde_json::from_value(json!({ "parent_id": "" })).unwrap();
        assert_eq!(req.parent_id, None);
        let req: SetParentRequest = serde_json::from_value(json!({ "parent_id": "2" })).unwrap();
        assert_eq!(req.parent_id, Some(CategoryId(2)));
    }

    #[test]
    fn test_bulk_parses_entries() {
        let parsed = bulk(json!([{ "id": 4, "quantity": 2 }, { "id": 7, "quantity": 0 }])).unwrap();
        assert_eq!(
            parsed,
            vec![
                QuantityUpdate { id: AssignmentId(4), quantity: 2 },
                QuantityUpdate { id: AssignmentId(7), quantity: 0 },
            ]
        );
    }

    #[test]
    fn test_bulk_rejects_non_list_and_empty() {
        for updates in [json!({}), json!([]), Value::Null, json!("1,2")] {
            assert_eq!(bulk(updates).unwrap_err().kind, ErrorKind::Validation);
        }
    }

    #[test]
    fn test_bulk_rejects_bad_entries() {
        let err = bulk(json!([{ "id": 1, "quantity": -1 }])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = bulk(json!([{ "quantity": 1 }])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_bulk_accepts_string_ids() {
        let parsed = bulk(json!([{ "id": "4", "quantity": 2 }])).unwrap();
        assert_eq!(parsed[0].id, AssignmentId(4));
    }

    #[test]
    fn test_missing_category_fails_validation() {
        let req: CreateProductRequest =
            serde_json::from_value(json!({ "name": "Brett" })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_product_price_defaults_to_zero() {
        let req: CreateProductRequest =
            serde_json::from_value(json!({ "name": "Brett", "category_id": 3 })).unwrap();
        let product = req.into_entity().unwrap();
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.category_id, CategoryId(3));
    }
}
