//! 测试共用的产品构造器与记录型替身

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use catalog::app::product::dates::{self, revision_date_for};
use catalog::{CatalogError, Notifier, Product, ProductApi, ProductEnvelope, Result};
use chrono::{Duration, NaiveDate};

pub fn release_in(days: i64) -> NaiveDate {
    dates::today() + Duration::days(days)
}

pub fn product(id: &str, name: &str) -> Product {
    let date_release = release_in(10);
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: "Producto financiero de prueba".to_string(),
        logo: "https://example.com/logo.png".to_string(),
        date_release,
        date_revision: revision_date_for(date_release).unwrap(),
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// 内存替身：记录每次调用，可按状态码注入失败
#[derive(Default)]
pub struct RecordingApi {
    pub products: Mutex<Vec<Product>>,
    pub calls: Mutex<Vec<String>>,
    pub list_status: Option<u16>,
    pub delete_status: Option<u16>,
    pub verify_status: Option<u16>,
}

impl RecordingApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, operation: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(operation))
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProductApi for RecordingApi {
    async fn get_products(&self) -> Result<ProductEnvelope> {
        self.record("get_products".to_string());
        if let Some(status) = self.list_status {
            return Err(CatalogError::from_status(status, "list failed"));
        }
        Ok(ProductEnvelope {
            data: self.products.lock().unwrap().clone(),
        })
    }

    async fn add_product(&self, product: &Product) -> Result<Product> {
        self.record(format!("add_product {}", product.id));
        self.products.lock().unwrap().push(product.clone());
        Ok(product.clone())
    }

    async fn update_product(&self, id: &str, product: &Product) -> Result<Product> {
        self.record(format!("update_product {id}"));
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|existing| existing.id == id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(product.clone())
            }
            None => Err(CatalogError::not_found("Not product found with that identifier")),
        }
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.record(format!("delete_product {id}"));
        if let Some(status) = self.delete_status {
            return Err(CatalogError::from_status(status, "delete failed"));
        }
        self.products.lock().unwrap().retain(|product| product.id != id);
        Ok(())
    }

    async fn verify_product_id(&self, id: &str) -> Result<bool> {
        self.record(format!("verify_product_id {id}"));
        if let Some(status) = self.verify_status {
            return Err(CatalogError::from_status(status, "verify failed"));
        }
        Ok(self.products.lock().unwrap().iter().any(|product| product.id == id))
    }
}
