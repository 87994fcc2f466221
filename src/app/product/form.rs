//! 产品新增/编辑表单
//!
//! 没有传入产品时为新增模式，可编辑全部字段；传入产品时为编辑模式，ID 固定。
//! 修订日期不可直接编辑，发布日期每次变化时由字段钩子重新计算。

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

use super::dates::{self, RELEASE_DATE_INVALID};
use super::model::Product;
use super::service::ProductApi;
use crate::app::navigation::{Navigator, Notifier, Route};
use crate::core::error::{CatalogError, Result};

pub const PRODUCT_EXISTS_NOTICE: &str = "产品已存在。";
pub const PRODUCT_ADDED_NOTICE: &str = "产品添加成功";
pub const PRODUCT_UPDATED_NOTICE: &str = "产品更新成功";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Name,
    Description,
    Logo,
    DateRelease,
    DateRevision,
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Id => "id",
            FormField::Name => "name",
            FormField::Description => "description",
            FormField::Logo => "logo",
            FormField::DateRelease => "date_release",
            FormField::DateRevision => "date_revision",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// 表单的原始字段值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 3, max = 10, message = "ID 长度必须在 3 到 10 个字符之间"))]
    pub id: String,
    #[validate(length(min = 5, max = 100, message = "名称长度必须在 5 到 100 个字符之间"))]
    pub name: String,
    #[validate(length(min = 10, max = 200, message = "描述长度必须在 10 到 200 个字符之间"))]
    pub description: String,
    #[validate(length(min = 1, message = "Logo 不能为空"))]
    pub logo: String,
    #[validate(length(min = 1, message = "发布日期不能为空"))]
    pub date_release: String,
    #[validate(length(min = 1, message = "修订日期不能为空"))]
    pub date_revision: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            logo: product.logo.clone(),
            date_release: dates::format_iso(product.date_release),
            date_revision: dates::format_iso(product.date_revision),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Logo => &self.logo,
            FormField::DateRelease => &self.date_release,
            FormField::DateRevision => &self.date_revision,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Logo => &mut self.logo,
            FormField::DateRelease => &mut self.date_release,
            FormField::DateRevision => &mut self.date_revision,
        }
    }

    /// 长度与必填规则之外，再以给定日期校验发布日期
    pub fn validate_at(&self, today: chrono::NaiveDate) -> std::result::Result<(), ValidationErrors> {
        let mut errors = match Validate::validate(self) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if dates::validate_release_date_at(Some(&self.date_release), today).is_err() {
            let mut error = ValidationError::new(RELEASE_DATE_INVALID);
            error.message = Some("发布日期必须是今天或之后的有效日期".into());
            errors.add("date_release", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_product(&self) -> Result<Product> {
        let date_release = dates::parse_calendar_date(&self.date_release)
            .ok_or_else(|| CatalogError::Validation("发布日期无效".to_string()))?;
        let date_revision = dates::parse_calendar_date(&self.date_revision)
            .ok_or_else(|| CatalogError::Validation("修订日期无效".to_string()))?;

        Ok(Product {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            logo: self.logo.clone(),
            date_release,
            date_revision,
        })
    }
}

type FieldHook = Box<dyn Fn(&mut ProductForm) + Send + Sync>;

/// 发布日期变化时重新计算修订日期；无法解析时清空
fn recompute_revision(form: &mut ProductForm) {
    form.date_revision = dates::parse_calendar_date(&form.date_release)
        .and_then(dates::revision_date_for)
        .map(dates::format_iso)
        .unwrap_or_default();
}

pub struct ProductFormView {
    api: Arc<dyn ProductApi>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    mode: FormMode,
    form: ProductForm,
    hooks: Vec<(FormField, FieldHook)>,
}

impl ProductFormView {
    pub fn new(
        api: Arc<dyn ProductApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        editing: Option<&Product>,
    ) -> Self {
        let (mode, form) = match editing {
            Some(product) => (
                FormMode::Edit {
                    id: product.id.clone(),
                },
                ProductForm::from_product(product),
            ),
            None => (FormMode::Create, ProductForm::default()),
        };

        let mut view = Self {
            api,
            navigator,
            notifier,
            mode,
            form,
            hooks: Vec::new(),
        };
        view.on_change_date_release();
        view
    }

    /// 根据导航状态选择模式
    pub fn from_route(
        api: Arc<dyn ProductApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        route: &Route,
    ) -> Self {
        Self::new(api, navigator, notifier, route.editing())
    }

    fn on_change_date_release(&mut self) {
        self.hooks
            .push((FormField::DateRelease, Box::new(recompute_revision)));
    }

    pub fn is_editable(&self, field: FormField) -> bool {
        match field {
            FormField::DateRevision => false,
            FormField::Id => self.mode == FormMode::Create,
            _ => true,
        }
    }

    /// 修改字段值并触发依赖该字段的钩子；不可编辑的字段返回 `false`。
    /// ID 去除首尾空白后保存。
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if !self.is_editable(field) {
            return false;
        }

        let value = value.into();
        *self.form.slot(field) = match field {
            FormField::Id => value.trim().to_string(),
            _ => value,
        };
        for (_, hook) in self.hooks.iter().filter(|(source, _)| *source == field) {
            hook(&mut self.form);
        }
        true
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.form.validate_at(dates::today())
    }

    pub async fn submit(&mut self) -> Result<Product> {
        match self.mode.clone() {
            FormMode::Create => self.submit_create().await,
            FormMode::Edit { .. } => self.submit_update().await,
        }
    }

    async fn submit_create(&mut self) -> Result<Product> {
        self.validate()?;
        let product = self.form.to_product()?;

        let exists = self.api.verify_product_id(&product.id).await.map_err(|err| {
            error!(id = %product.id, error = %err, "验证产品是否存在时出错");
            err
        })?;

        if exists {
            self.notifier.alert(PRODUCT_EXISTS_NOTICE);
            return Err(CatalogError::Conflict { id: product.id });
        }

        let created = self.api.add_product(&product).await.map_err(|err| {
            error!(id = %product.id, error = %err, "添加产品失败");
            err
        })?;

        info!(id = %created.id, "产品已添加");
        self.notifier.alert(PRODUCT_ADDED_NOTICE);
        self.navigator.navigate(Route::ProductList);
        Ok(created)
    }

    async fn submit_update(&mut self) -> Result<Product> {
        if self.form.id.trim().is_empty() {
            error!("更新失败：产品 ID 为空");
            return Err(CatalogError::MissingId);
        }

        self.validate()?;
        let product = self.form.to_product()?;

        let updated = self
            .api
            .update_product(&product.id, &product)
            .await
            .map_err(|err| {
                error!(id = %product.id, status = ?err.status(), error = %err, "更新产品失败");
                err
            })?;

        info!(id = %updated.id, "产品已更新");
        self.notifier.alert(PRODUCT_UPDATED_NOTICE);
        self.navigator.navigate(Route::ProductList);
        Ok(updated)
    }

    /// 清空表单；编辑模式保留原 ID
    pub fn on_reset(&mut self) {
        self.form = ProductForm::default();
        if let FormMode::Edit { id } = &self.mode {
            self.form.id = id.clone();
        }
    }

    pub fn go_to_list(&self) {
        self.navigator.back();
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }
}
