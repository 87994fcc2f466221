//! 内存产品仓库

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Duration, NaiveDate};
use validator::Validate;

use crate::app::product::dates::{self, revision_date_for};
use crate::app::product::Product;
use crate::core::error::{CatalogError, Result};

pub const DUPLICATE_ID_MESSAGE: &str = "Duplicate identifier found in the database";
pub const NOT_FOUND_MESSAGE: &str = "Not product found with that identifier";

/// 按插入顺序保存产品的共享仓库
#[derive(Clone, Default)]
pub struct ProductStore {
    products: Arc<Mutex<Vec<Product>>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<Product> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.lock().iter().any(|product| product.id == id)
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.lock().iter().find(|product| product.id == id).cloned()
    }

    pub fn create(&self, product: Product) -> Result<Product> {
        check_body(&product)?;

        let mut products = self.lock();
        if products.iter().any(|existing| existing.id == product.id) {
            return Err(CatalogError::bad_request(DUPLICATE_ID_MESSAGE));
        }

        products.push(product.clone());
        Ok(product)
    }

    pub fn update(&self, id: &str, product: Product) -> Result<Product> {
        if product.id != id {
            return Err(CatalogError::bad_request(format!(
                "路径 ID {} 与请求体 ID {} 不一致",
                id, product.id
            )));
        }
        check_body(&product)?;

        let mut products = self.lock();
        let slot = products
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| CatalogError::not_found(NOT_FOUND_MESSAGE))?;

        *slot = product.clone();
        Ok(product)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut products = self.lock();
        let index = products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| CatalogError::not_found(NOT_FOUND_MESSAGE))?;

        products.remove(index);
        Ok(())
    }

    /// 写入示例数据，发布日期从 `today` 起依次往后排
    pub fn seed_samples(&self, today: NaiveDate) -> Result<usize> {
        let samples = [
            ("trj-crd", "Tarjeta de Credito", "Tarjeta de consumo bajo la modalidad de credito"),
            ("trj-deb", "Tarjeta de Debito", "Tarjeta asociada a la cuenta de ahorros"),
            ("cta-aho", "Cuenta de Ahorros", "Cuenta de ahorros con rendimiento mensual"),
            ("inv-fij", "Inversion a Plazo Fijo", "Deposito a plazo fijo con tasa preferencial"),
        ];

        for (offset, (id, name, description)) in samples.into_iter().enumerate() {
            let date_release = today + Duration::days(30 * offset as i64);
            let date_revision = revision_date_for(date_release)
                .ok_or_else(|| CatalogError::Validation("修订日期超出范围".to_string()))?;

            self.create(Product {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                logo: format!("https://www.visa.com.ec/dam/VCOM/regional/lac/{id}.jpg"),
                date_release,
                date_revision,
            })?;
        }

        Ok(self.len())
    }
}

/// 请求体校验：字段长度规则 + 修订日期必须等于发布日期加一年
fn check_body(product: &Product) -> Result<()> {
    product.validate()?;

    if revision_date_for(product.date_release) != Some(product.date_revision) {
        return Err(CatalogError::bad_request(format!(
            "修订日期必须为 {}",
            revision_date_for(product.date_release)
                .map(dates::format_iso)
                .unwrap_or_default()
        )));
    }

    Ok(())
}
