//! Read side of the storefront catalog, served by two remote procedures.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::StoreClient;
use crate::error::StoreError;

/// Default page size used by the storefront.
pub const DEFAULT_PAGE_LIMIT: u32 = 60;

/// A product row as returned by `get_catalog_products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    pub code: Option<String>,
    pub name: String,
    pub brand: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub store_name: String,
    pub whatsapp_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBrand {
    pub brand: String,
}

/// Filter and page for a catalog listing.
///
/// Empty filter strings are sent as `null`, meaning "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Store slug identifying the tenant's public catalog.
    pub slug: String,
    pub query: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            query: None,
            brand: None,
            category: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }

    pub(crate) fn to_rpc_args(&self) -> serde_json::Value {
        json!({
            "p_slug": self.slug,
            "p_query": non_empty(self.query.as_deref()),
            "p_brand": non_empty(self.brand.as_deref()),
            "p_category": non_empty(self.category.as_deref()),
            "p_limit": self.limit,
            "p_offset": self.offset,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl StoreClient {
    /// Lists one page of a store's active products.
    ///
    /// A `null` result from the store is returned as an empty list.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the RPC call.
    pub async fn fetch_catalog_products(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogProduct>, StoreError> {
        let rows = self
            .call_rpc::<Vec<CatalogProduct>>("get_catalog_products", &query.to_rpc_args())
            .await?;
        Ok(rows.unwrap_or_default())
    }

    /// Lists the distinct brands present in a store's catalog.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the RPC call.
    pub async fn fetch_catalog_brands(&self, slug: &str) -> Result<Vec<CatalogBrand>, StoreError> {
        let rows = self
            .call_rpc::<Vec<CatalogBrand>>("get_catalog_brands", &json!({ "p_slug": slug }))
            .await?;
        Ok(rows.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_match_storefront_paging() {
        let q = CatalogQuery::new("petshop-centro");
        assert_eq!(q.limit, 60);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn rpc_args_send_empty_filters_as_null() {
        let q = CatalogQuery {
            query: Some(String::new()),
            brand: Some("Golden".to_owned()),
            ..CatalogQuery::new("petshop-centro")
        };
        assert_eq!(
            q.to_rpc_args(),
            json!({
                "p_slug": "petshop-centro",
                "p_query": null,
                "p_brand": "Golden",
                "p_category": null,
                "p_limit": 60,
                "p_offset": 0,
            })
        );
    }

    #[test]
    fn catalog_product_accepts_null_optional_columns() {
        let row: CatalogProduct = serde_json::from_value(json!({
            "id": "p1",
            "code": null,
            "name": "Racao Adulto",
            "brand": "Golden",
            "category": null,
            "description": null,
            "image_url": null,
            "store_name": "Pet Centro",
            "whatsapp_phone": "5511999999999",
        }))
        .unwrap();
        assert_eq!(row.code, None);
        assert_eq!(row.brand, "Golden");
    }
}
